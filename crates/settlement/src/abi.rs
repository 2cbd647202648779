//! Solidity bindings for the contracts DropCraft builds calls against.
//!
//! Selectors and argument layouts come from these declarations, so they must
//! stay identical to the deployed contracts' ABIs.

use alloy_sol_types::sol;

sol! {
    /// Per-wave Merkle distributor on L2.
    interface IMerkleDistributor {
        function claim(uint256 _index, uint256 _amount, bytes32[] calldata _merkleProof) external;
    }

    /// L1 entry point for L1 → L2 transactions.
    interface IBridgehub {
        struct L2TransactionRequestDirect {
            uint256 chainId;
            uint256 mintValue;
            address l2Contract;
            uint256 l2Value;
            bytes l2Calldata;
            uint256 l2GasLimit;
            uint256 l2GasPerPubdataByteLimit;
            bytes[] factoryDeps;
            address refundRecipient;
        }

        function requestL2TransactionDirect(L2TransactionRequestDirect calldata _request)
            external
            payable
            returns (bytes32 canonicalTxHash);

        function l2TransactionBaseCost(
            uint256 _chainId,
            uint256 _gasPrice,
            uint256 _l2GasLimit,
            uint256 _l2GasPerPubdataByteLimit
        ) external view returns (uint256 baseCost);
    }

    /// The airdropped token on L2.
    interface IERC20 {
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

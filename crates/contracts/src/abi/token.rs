use alloy_sol_types::sol;

sol! {
    /// The ERC-20 surface used by the bridge flows. The L1 native token additionally supports
    /// `approveAndCall`.
    #[sol(rpc, all_derives)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function approveAndCall(address spender, uint256 amount, bytes calldata data) external returns (bool);
        function transferFrom(address from, address to, uint256 amount) external returns (bool);
    }
}

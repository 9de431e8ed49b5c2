#![allow(dead_code)]
use alloy::sol;

sol!(
    #[sol(rpc)]
    contract MigrateV2ToV3 {
        function poolDaiToken() external view returns (address);
        function poolUsdcToken() external view returns (address);
        function poolDaiPod() external view returns (address);
        function poolUsdcPod() external view returns (address);
        function v3Token() external view returns (address);
        function owner() external view returns (address);
        function transferOwnership(address newOwner) external;

        function tokensReceived(address operator, address from, address to, uint256 amount, bytes userData, bytes operatorData) external;

        function withdrawERC777(address token, address to) external;
        function withdrawERC20(address token, address to) external;
        function withdrawERC20Batch(address[] tokens, address to) external;
        function withdrawERC721(address token, uint256 tokenId, address to) external;

        error MigrationUnsupportedToken(address token);
        error MigrationInvalidRecipient(address to);
        error MigrationUnsupportedDecimals(address token, uint8 decimals);
        error MigrationConversionOverflow(address token, uint256 amount);
        error MigrationRegistrationFailed(address registry);
        error MigrationFailedOperation(address token);
        error OwnableUnauthorizedAccount(address account);
        error OwnableInvalidOwner(address owner);

        #[derive(Debug, PartialEq)]
        event TicketsMigrated(address indexed token, address indexed account, uint256 amount, uint256 v3Amount);
        #[derive(Debug, PartialEq)]
        event TokensWithdrawn(address indexed token, address indexed to, uint256 amount);
        #[derive(Debug, PartialEq)]
        event NftWithdrawn(address indexed token, address indexed to, uint256 tokenId);
    }
);

sol!(
    #[sol(rpc)]
    contract Erc1820Registry {
        function getInterfaceImplementer(address account, bytes32 interfaceHash) external view returns (address);
        function setInterfaceImplementer(address account, bytes32 interfaceHash, address implementer) external;
    }
);

sol!(
    #[sol(rpc)]
    contract Erc777Mintable {
        function balanceOf(address owner) external view returns (uint256);
        function decimals() external view returns (uint8);
        function send(address recipient, uint256 amount, bytes data) external;
        function mint(address to, uint256 amount) external;
    }
);

sol!(
    #[sol(rpc)]
    contract MockPod {
        function balanceOf(address owner) external view returns (uint256);
        function balanceOfUnderlying(address user) external view returns (uint256);
        function tokenToCollateralValue(uint256 tokens) external view returns (uint256);
        function send(address recipient, uint256 amount, bytes data) external;
        function mint(address to, uint256 amount) external;
        function setValue(uint256 value) external;
    }
);

sol!(
    #[sol(rpc)]
    contract Erc20Mintable {
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 value) external returns (bool);
        function mint(address to, uint256 value) external;

        error ERC20InsufficientBalance(address sender, uint256 balance, uint256 needed);
    }
);

sol!(
    #[sol(rpc)]
    contract Erc721Mintable {
        function ownerOf(uint256 tokenId) external view returns (address);
        function mint(address to, uint256 tokenId) external;
    }
);

// ============================================================
// User error messages
// ============================================================

pub const ERR_INVALID_CONFIG: &str = "Max depositor limit must be positive";

// ── createPool ──

pub const ERR_ALREADY_INITIALIZED: &str = "Pool already initialized";
pub const ERR_INVALID_LIMIT: &str = "Invalid depositor limit";
pub const ERR_INVALID_WEIGHT: &str = "Invalid withdraw weight";
pub const ERR_INVALID_WEIGHT_SUM: &str = "Withdraw weights must sum to 1000";
pub const ERR_INVALID_AMOUNT: &str = "Deposit amount must be positive";

// ── deposit / withdraw ──

pub const ERR_POOL_NOT_FOUND: &str = "Pool does not exist";
pub const ERR_EXPIRED: &str = "Pool expired";
pub const ERR_POOL_FULL: &str = "Pool is full";
pub const ERR_ALREADY_DEPOSITED: &str = "Already deposited";
pub const ERR_WRONG_TOKEN: &str = "Wrong payment token";
pub const ERR_WRONG_AMOUNT: &str = "Payment must equal the deposit amount";
pub const ERR_NEVER_DEPOSITED: &str = "Never deposited";
pub const ERR_ALREADY_WITHDRAWN: &str = "Already withdrawn";
pub const ERR_INSUFFICIENT_ESCROW: &str = "Insufficient escrow";

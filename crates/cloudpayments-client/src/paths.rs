//! API paths, relative to the configured base URL.

pub const TEST: &str = "/test";

pub const CARDS_CHARGE: &str = "/payments/cards/charge";
pub const CARDS_AUTH: &str = "/payments/cards/auth";
pub const CARDS_POST_3DS: &str = "/payments/cards/post3ds";
pub const TOKENS_CHARGE: &str = "/payments/tokens/charge";
pub const TOKENS_AUTH: &str = "/payments/tokens/auth";
pub const SBP_LINK: &str = "/payments/qr/sbp/link";

pub const CONFIRM: &str = "/payments/confirm";
pub const VOID: &str = "/payments/void";
pub const REFUND: &str = "/payments/refund";
pub const FIND: &str = "/payments/find";
pub const LIST: &str = "/payments/list";

pub const RECEIPT: &str = "/kkt/receipt";
pub const RECEIPT_GET: &str = "/kkt/receipt/get";

pub const ORDERS_CREATE: &str = "/orders/create";
pub const ORDERS_CANCEL: &str = "/orders/cancel";

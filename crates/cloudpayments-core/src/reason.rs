//! # Reason Codes
//!
//! Decline codes issued by the gateway or the card issuer in `Model.ReasonCode`.
//! Zero means the transaction was not declined.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stands in for a `ReasonCode` that is present but not a number
pub const UNRECOGNIZED_REASON_CODE: i64 = -1;

/// Documented gateway decline reasons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonCode {
    Approved,
    ReferToCardIssuer,
    InvalidMerchant,
    PickUpCard,
    DoNotHonor,
    Error,
    PickUpCardSpecialConditions,
    InvalidTransaction,
    AmountError,
    InvalidCardNumber,
    NoSuchIssuer,
    TransactionError,
    FormatError,
    BankNotSupportedBySwitch,
    ExpiredCardPickup,
    SuspectedFraud,
    RestrictedCard,
    LostCard,
    StolenCard,
    InsufficientFunds,
    ExpiredCard,
    TransactionNotPermitted,
    RestrictedCard2,
    SecurityViolation,
    ExceedWithdrawalFrequency,
    IncorrectCvv,
    Timeout,
    CannotReachNetwork,
    SystemError,
    UnableToProcess,
    AuthenticationFailed,
    AuthenticationUnavailable,
    AntiFraud,
}

impl ReasonCode {
    /// Look up a numeric code. Unknown codes return `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        let reason = match code {
            0 => Self::Approved,
            5001 => Self::ReferToCardIssuer,
            5003 => Self::InvalidMerchant,
            5004 => Self::PickUpCard,
            5005 => Self::DoNotHonor,
            5006 => Self::Error,
            5007 => Self::PickUpCardSpecialConditions,
            5012 => Self::InvalidTransaction,
            5013 => Self::AmountError,
            5014 => Self::InvalidCardNumber,
            5015 => Self::NoSuchIssuer,
            5019 => Self::TransactionError,
            5030 => Self::FormatError,
            5031 => Self::BankNotSupportedBySwitch,
            5033 => Self::ExpiredCardPickup,
            5034 => Self::SuspectedFraud,
            5036 => Self::RestrictedCard,
            5041 => Self::LostCard,
            5043 => Self::StolenCard,
            5051 => Self::InsufficientFunds,
            5054 => Self::ExpiredCard,
            5057 => Self::TransactionNotPermitted,
            5062 => Self::RestrictedCard2,
            5063 => Self::SecurityViolation,
            5065 => Self::ExceedWithdrawalFrequency,
            5082 => Self::IncorrectCvv,
            5091 => Self::Timeout,
            5092 => Self::CannotReachNetwork,
            5096 => Self::SystemError,
            5204 => Self::UnableToProcess,
            5206 => Self::AuthenticationFailed,
            5207 => Self::AuthenticationUnavailable,
            5300 => Self::AntiFraud,
            _ => return None,
        };
        Some(reason)
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Approved => 0,
            Self::ReferToCardIssuer => 5001,
            Self::InvalidMerchant => 5003,
            Self::PickUpCard => 5004,
            Self::DoNotHonor => 5005,
            Self::Error => 5006,
            Self::PickUpCardSpecialConditions => 5007,
            Self::InvalidTransaction => 5012,
            Self::AmountError => 5013,
            Self::InvalidCardNumber => 5014,
            Self::NoSuchIssuer => 5015,
            Self::TransactionError => 5019,
            Self::FormatError => 5030,
            Self::BankNotSupportedBySwitch => 5031,
            Self::ExpiredCardPickup => 5033,
            Self::SuspectedFraud => 5034,
            Self::RestrictedCard => 5036,
            Self::LostCard => 5041,
            Self::StolenCard => 5043,
            Self::InsufficientFunds => 5051,
            Self::ExpiredCard => 5054,
            Self::TransactionNotPermitted => 5057,
            Self::RestrictedCard2 => 5062,
            Self::SecurityViolation => 5063,
            Self::ExceedWithdrawalFrequency => 5065,
            Self::IncorrectCvv => 5082,
            Self::Timeout => 5091,
            Self::CannotReachNetwork => 5092,
            Self::SystemError => 5096,
            Self::UnableToProcess => 5204,
            Self::AuthenticationFailed => 5206,
            Self::AuthenticationUnavailable => 5207,
            Self::AntiFraud => 5300,
        }
    }

    /// Short description suitable for logs and operator output
    pub fn description(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::ReferToCardIssuer => "Refer to card issuer",
            Self::InvalidMerchant => "Invalid merchant",
            Self::PickUpCard => "Pick up card",
            Self::DoNotHonor => "Do not honor",
            Self::Error => "Error",
            Self::PickUpCardSpecialConditions => "Pick up card, special conditions",
            Self::InvalidTransaction => "Invalid transaction",
            Self::AmountError => "Amount error",
            Self::InvalidCardNumber => "Invalid card number",
            Self::NoSuchIssuer => "No such issuer",
            Self::TransactionError => "Transaction error",
            Self::FormatError => "Format error",
            Self::BankNotSupportedBySwitch => "Bank not supported by switch",
            Self::ExpiredCardPickup => "Expired card, pick up",
            Self::SuspectedFraud => "Suspected fraud",
            Self::RestrictedCard => "Restricted card",
            Self::LostCard => "Lost card",
            Self::StolenCard => "Stolen card",
            Self::InsufficientFunds => "Insufficient funds",
            Self::ExpiredCard => "Expired card",
            Self::TransactionNotPermitted => "Transaction not permitted",
            Self::RestrictedCard2 => "Restricted card",
            Self::SecurityViolation => "Security violation",
            Self::ExceedWithdrawalFrequency => "Exceeds withdrawal frequency limit",
            Self::IncorrectCvv => "Incorrect CVV",
            Self::Timeout => "Issuer timeout",
            Self::CannotReachNetwork => "Cannot reach network",
            Self::SystemError => "System error",
            Self::UnableToProcess => "Unable to process",
            Self::AuthenticationFailed => "3-D Secure authentication failed",
            Self::AuthenticationUnavailable => "3-D Secure authentication unavailable",
            Self::AntiFraud => "Anti-fraud rejection",
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.code())
    }
}

/// Human description for a raw code, falling back to the number itself.
pub fn describe(code: i64) -> String {
    if code == UNRECOGNIZED_REASON_CODE {
        return "unrecognized reason code".to_string();
    }

    match ReasonCode::from_code(code) {
        Some(reason) => reason.to_string(),
        None => format!("reason code {}", code),
    }
}

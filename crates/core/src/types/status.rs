//! Status and classification enums.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// The ledger does not enforce a transition graph: any status may replace
/// any other through the admin surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on delivery.
    Cod,
    /// UPI transfer.
    Upi,
    /// Debit or credit card.
    Card,
}

/// Settlement state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
}

/// Menu category. The catalog uses this fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Pizza,
    Burger,
    Pasta,
    Salad,
    Dessert,
}

impl Category {
    /// All categories, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Pizza,
        Self::Burger,
        Self::Pasta,
        Self::Salad,
        Self::Dessert,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pizza => write!(f, "Pizza"),
            Self::Burger => write!(f, "Burger"),
            Self::Pasta => write!(f, "Pasta"),
            Self::Salad => write!(f, "Salad"),
            Self::Dessert => write!(f, "Dessert"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pizza" => Ok(Self::Pizza),
            "Burger" => Ok(Self::Burger),
            "Pasta" => Ok(Self::Pasta),
            "Salad" => Ok(Self::Salad),
            "Dessert" => Ok(Self::Dessert),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

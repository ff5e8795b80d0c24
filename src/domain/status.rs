//! Status vocabularies for orders, custom orders, payments, deliveries and the back
//! office ledgers, and the transitions each one permits.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

macro_rules! string_enum {
    ($name:ident, $label:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(AppError::BadRequest(format!(
                        concat!("Invalid ", $label, " '{}'"),
                        other
                    ))),
                }
            }
        }
    };
}

string_enum!(OrderStatus, "order status" {
    Pending => "pending",
    Confirmed => "confirmed",
    Preparing => "preparing",
    ReadyForDelivery => "ready_for_delivery",
    Delivered => "delivered",
    Cancelled => "cancelled",
});

string_enum!(CustomOrderStatus, "custom order status" {
    Pending => "pending",
    Accepted => "accepted",
    InProgress => "in_progress",
    Completed => "completed",
    Cancelled => "cancelled",
});

string_enum!(PaymentStatus, "payment status" {
    Pending => "pending",
    Paid => "paid",
    Failed => "failed",
});

string_enum!(PaymentMethod, "payment method" {
    Cash => "cash",
    Bank => "bank",
});

string_enum!(DeliveryStatus, "delivery status" {
    NotAssigned => "not_assigned",
    Assigned => "assigned",
    PickedUp => "picked_up",
    InTransit => "in_transit",
    Delivered => "delivered",
});

string_enum!(PurchaseOrderStatus, "purchase order status" {
    Pending => "pending",
    Approved => "approved",
    Received => "received",
    Cancelled => "cancelled",
});

string_enum!(PurchasePaymentStatus, "purchase payment status" {
    Unpaid => "unpaid",
    Partial => "partial",
    Paid => "paid",
});

string_enum!(SupplierStatus, "supplier status" {
    Active => "active",
    Inactive => "inactive",
});

string_enum!(RequestStatus, "request status" {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
});

string_enum!(SalaryStatus, "salary status" {
    Pending => "pending",
    Paid => "paid",
});

impl OrderStatus {
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, Preparing)
                | (Preparing, ReadyForDelivery)
                | (ReadyForDelivery, Delivered)
                | (Pending | Confirmed | Preparing | ReadyForDelivery, Cancelled)
        )
    }
}

impl CustomOrderStatus {
    pub fn can_transition_to(self, next: CustomOrderStatus) -> bool {
        use CustomOrderStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted)
                | (Accepted, InProgress)
                | (InProgress, Completed)
                | (Pending | Accepted | InProgress, Cancelled)
        )
    }
}

impl DeliveryStatus {
    pub fn can_transition_to(self, next: DeliveryStatus) -> bool {
        use DeliveryStatus::*;
        matches!(
            (self, next),
            (NotAssigned, Assigned)
                | (Assigned, PickedUp)
                | (Assigned, InTransit)
                | (PickedUp, InTransit)
                | (PickedUp, Delivered)
                | (InTransit, Delivered)
        )
    }
}

impl PurchaseOrderStatus {
    pub fn can_transition_to(self, next: PurchaseOrderStatus) -> bool {
        use PurchaseOrderStatus::*;
        matches!(
            (self, next),
            (Pending, Approved) | (Pending | Approved, Received) | (Pending | Approved, Cancelled)
        )
    }
}

impl PurchasePaymentStatus {
    /// Payment state of a purchase order after `paid` of `total` has been settled.
    pub fn for_amounts(paid: i64, total: i64) -> Self {
        if paid <= 0 {
            PurchasePaymentStatus::Unpaid
        } else if paid < total {
            PurchasePaymentStatus::Partial
        } else {
            PurchasePaymentStatus::Paid
        }
    }
}

impl PaymentMethod {
    /// Cash is settled on delivery by the courier, so a cash custom order starts out paid.
    pub fn initial_custom_order_payment(self) -> PaymentStatus {
        match self {
            PaymentMethod::Cash => PaymentStatus::Paid,
            PaymentMethod::Bank => PaymentStatus::Pending,
        }
    }
}

/// Parses a stored status column, surfacing corrupt values as internal errors.
pub fn parse_stored<T>(value: &str) -> Result<T, AppError>
where
    T: FromStr<Err = AppError>,
{
    value
        .parse()
        .map_err(|_| AppError::Internal(anyhow::anyhow!("unexpected stored status '{value}'")))
}

/// Builds a "cannot move from A to B" rejection.
pub fn transition_error(what: &str, from: impl fmt::Display, to: impl fmt::Display) -> AppError {
    AppError::BadRequest(format!("Cannot move {what} from '{from}' to '{to}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_follows_fulfilment_chain() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(ReadyForDelivery));
        assert!(ReadyForDelivery.can_transition_to(Delivered));

        assert!(!Pending.can_transition_to(Delivered));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
    }

    #[test]
    fn every_pre_delivery_order_state_can_cancel() {
        for status in OrderStatus::ALL {
            let expected = !matches!(status, OrderStatus::Delivered | OrderStatus::Cancelled);
            assert_eq!(status.can_transition_to(OrderStatus::Cancelled), expected, "{status}");
        }
    }

    #[test]
    fn custom_order_cannot_skip_acceptance() {
        use CustomOrderStatus::*;
        assert!(Pending.can_transition_to(Accepted));
        assert!(!Pending.can_transition_to(InProgress));
        assert!(!Pending.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Cancelled));
    }

    #[test]
    fn delivery_moves_forward_only() {
        use DeliveryStatus::*;
        assert!(NotAssigned.can_transition_to(Assigned));
        assert!(PickedUp.can_transition_to(Delivered));
        assert!(!NotAssigned.can_transition_to(Delivered));
        assert!(!Delivered.can_transition_to(InTransit));
        assert!(!InTransit.can_transition_to(PickedUp));
    }

    #[test]
    fn purchase_orders_are_received_once() {
        use PurchaseOrderStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Approved.can_transition_to(Received));
        assert!(!Received.can_transition_to(Received));
        assert!(!Received.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Approved));
    }

    #[test]
    fn purchase_payment_follows_amounts() {
        assert_eq!(PurchasePaymentStatus::for_amounts(0, 1000), PurchasePaymentStatus::Unpaid);
        assert_eq!(PurchasePaymentStatus::for_amounts(400, 1000), PurchasePaymentStatus::Partial);
        assert_eq!(PurchasePaymentStatus::for_amounts(1000, 1000), PurchasePaymentStatus::Paid);
    }

    #[test]
    fn cash_custom_orders_start_paid() {
        assert_eq!(PaymentMethod::Cash.initial_custom_order_payment(), PaymentStatus::Paid);
        assert_eq!(PaymentMethod::Bank.initial_custom_order_payment(), PaymentStatus::Pending);
    }

    #[test]
    fn parses_wire_names() {
        assert_eq!(
            "ready_for_delivery".parse::<OrderStatus>().unwrap(),
            OrderStatus::ReadyForDelivery
        );
        assert_eq!(
            "in_progress".parse::<CustomOrderStatus>().unwrap(),
            CustomOrderStatus::InProgress
        );
        let err = "shipped".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.to_string(), "Bad Request Invalid order status 'shipped'");
        assert_eq!(
            serde_json::to_string(&DeliveryStatus::NotAssigned).unwrap(),
            "\"not_assigned\""
        );
    }
}

//! Order status lookup against the demo order table.
//!
//! Lookups never fail with an error. An unknown order number, or an email
//! without an `@`, is an ordinary [`OrderLookup::NotFound`].

use std::fmt;

use crate::catalog::Price;

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Accepted but not yet dispatched.
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Withdrawn before fulfilment.
    Cancelled,
}

impl OrderStatus {
    /// Badge label, capitalised.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Timeline milestones this status has reached, in order.
    #[must_use]
    pub const fn milestones(self) -> &'static [Milestone] {
        match self {
            Self::Processing => &[Milestone::Placed],
            Self::Shipped => &[Milestone::Placed, Milestone::Shipped],
            Self::Delivered => &[Milestone::Placed, Milestone::Shipped, Milestone::Delivered],
            Self::Cancelled => &[],
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A point on the order timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Milestone {
    /// The order was received.
    Placed,
    /// The order left the store.
    Shipped,
    /// The order arrived.
    Delivered,
}

impl Milestone {
    /// Every milestone, in timeline order.
    pub const ALL: [Self; 3] = [Self::Placed, Self::Shipped, Self::Delivered];

    /// Timeline label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Placed => "Order Placed",
            Self::Shipped => "Order Shipped",
            Self::Delivered => "Delivered",
        }
    }
}

/// One purchased line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Product name as printed on the order.
    pub name: &'static str,
    /// Units bought.
    pub quantity: u32,
    /// Unit price.
    pub unit_price: Price,
}

impl LineItem {
    /// Unit price times quantity.
    #[must_use]
    pub const fn subtotal(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// A stored order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    /// Order number, uppercase.
    pub number: &'static str,
    /// Fulfilment state.
    pub status: OrderStatus,
    /// Date the order was placed, as displayed.
    pub placed_on: &'static str,
    /// Charged total.
    pub total: Price,
    /// Purchased lines.
    pub items: &'static [LineItem],
    /// Carrier tracking number once shipped.
    pub tracking: Option<&'static str>,
    /// Estimated delivery date, as displayed.
    pub estimated_delivery: &'static str,
}

/// Demo orders available to the lookup.
pub static FIXTURE_ORDERS: &[OrderRecord] = &[
    OrderRecord {
        number: "ORD-2025-001",
        status: OrderStatus::Delivered,
        placed_on: "January 15, 2025",
        total: Price::from_cents(23_497),
        items: &[
            LineItem {
                name: "Introduction to Psychology",
                quantity: 1,
                unit_price: Price::from_cents(12_999),
            },
            LineItem {
                name: "Cardinal Hoodie",
                quantity: 1,
                unit_price: Price::from_cents(4_999),
            },
            LineItem {
                name: "Notebook Set",
                quantity: 3,
                unit_price: Price::from_cents(1_599),
            },
        ],
        tracking: Some("1Z999AA10123456784"),
        estimated_delivery: "January 20, 2025",
    },
    OrderRecord {
        number: "ORD-2025-002",
        status: OrderStatus::Shipped,
        placed_on: "January 18, 2025",
        total: Price::from_cents(17_999),
        items: &[LineItem {
            name: "Calculus: Early Transcendentals",
            quantity: 1,
            unit_price: Price::from_cents(17_999),
        }],
        tracking: Some("1Z999AA10123456785"),
        estimated_delivery: "January 22, 2025",
    },
    OrderRecord {
        number: "ORD-2025-003",
        status: OrderStatus::Processing,
        placed_on: "January 20, 2025",
        total: Price::from_cents(8_999),
        items: &[
            LineItem {
                name: "Ball State T-Shirt",
                quantity: 2,
                unit_price: Price::from_cents(2_499),
            },
            LineItem {
                name: "Ball State Cap",
                quantity: 1,
                unit_price: Price::from_cents(3_999),
            },
        ],
        tracking: None,
        estimated_delivery: "January 25, 2025",
    },
];

/// Source of order records keyed by uppercase order number.
pub trait OrderDirectory {
    /// Return the record stored under `number`, matched exactly.
    fn find(&self, number: &str) -> Option<&OrderRecord>;
}

/// [`OrderDirectory`] over [`FIXTURE_ORDERS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureOrders;

impl OrderDirectory for FixtureOrders {
    fn find(&self, number: &str) -> Option<&OrderRecord> {
        FIXTURE_ORDERS.iter().find(|order| order.number == number)
    }
}

/// Outcome of an order lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderLookup<'a> {
    /// The order exists and the email passed the format check.
    Found(&'a OrderRecord),
    /// No matching order, or the email was rejected.
    NotFound,
}

impl<'a> OrderLookup<'a> {
    /// The found record, if any.
    #[must_use]
    pub const fn record(self) -> Option<&'a OrderRecord> {
        match self {
            Self::Found(record) => Some(record),
            Self::NotFound => None,
        }
    }
}

/// Look up `number` in `directory`, gated by a loose email check.
///
/// The number is matched exactly, ignoring case; surrounding whitespace is
/// part of the key. The email must merely contain `@`; it is not compared
/// against the order.
pub fn lookup<'a, D: OrderDirectory + ?Sized>(
    directory: &'a D,
    number: &str,
    email: &str,
) -> OrderLookup<'a> {
    let key = number.to_uppercase();
    let outcome = directory
        .find(&key)
        .filter(|_| email.contains('@'))
        .map_or(OrderLookup::NotFound, OrderLookup::Found);
    tracing::debug!(order = %key, found = outcome.record().is_some(), "order lookup");
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn found(number: &str, email: &str) -> Option<&'static OrderRecord> {
        lookup(&FixtureOrders, number, email).record()
    }

    #[rstest]
    fn shipped_order_is_found_with_its_single_item() {
        let order = found("ORD-2025-002", "student@bsu.edu").expect("fixture order");
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.total, Price::from_cents(17_999));
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total.to_string(), "$179.99");
    }

    #[rstest]
    fn unknown_order_is_not_found() {
        assert_eq!(
            lookup(&FixtureOrders, "ORD-2025-999", "student@bsu.edu"),
            OrderLookup::NotFound
        );
    }

    #[rstest]
    #[case("student.bsu.edu")]
    #[case("")]
    fn email_without_at_sign_is_not_found(#[case] email: &str) {
        assert_eq!(
            lookup(&FixtureOrders, "ORD-2025-001", email),
            OrderLookup::NotFound
        );
    }

    #[rstest]
    #[case("ord-2025-003")]
    #[case("Ord-2025-003")]
    fn order_number_is_case_insensitive(#[case] number: &str) {
        let order = found(number, "a@b").expect("fixture order");
        assert_eq!(order.number, "ORD-2025-003");
        assert_eq!(order.tracking, None);
    }

    #[rstest]
    #[case(" ORD-2025-002 ")]
    #[case("ORD-2025-002 ")]
    #[case("\tord-2025-002")]
    fn padded_order_number_is_not_found(#[case] number: &str) {
        assert_eq!(
            lookup(&FixtureOrders, number, "student@bsu.edu"),
            OrderLookup::NotFound
        );
    }

    #[rstest]
    #[case(OrderStatus::Processing, 1)]
    #[case(OrderStatus::Shipped, 2)]
    #[case(OrderStatus::Delivered, 3)]
    #[case(OrderStatus::Cancelled, 0)]
    fn milestones_follow_status(#[case] status: OrderStatus, #[case] reached: usize) {
        assert_eq!(status.milestones().len(), reached);
        assert!(status
            .milestones()
            .iter()
            .zip(Milestone::ALL)
            .all(|(got, want)| *got == want));
    }

    #[rstest]
    fn line_subtotal_multiplies_quantity() {
        let order = found("ORD-2025-001", "x@y").expect("fixture order");
        let subtotals: Vec<String> = order
            .items
            .iter()
            .map(|item| item.subtotal().to_string())
            .collect();
        assert_eq!(subtotals, vec!["$129.99", "$49.99", "$47.97"]);
        assert_eq!(order.status.label(), "Delivered");
    }
}

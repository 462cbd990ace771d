//! The bookstore's "to be" transaction process.

use super::registry::{Link, LinkDirection, Step, StepCategory, StepRegistry};

/// Title used by the diagram header and every export.
pub const FLOW_TITLE: &str = "Bookstore Transaction Process Flow";

/// One-line summary stored in data exports.
pub const FLOW_DESCRIPTION: &str = "Interactive 'to be' process for customer transactions in physical and online bookstore environments";

fn bookstore_steps() -> Vec<Step> {
    use StepCategory::{Activity, Decision, End, Start, System};

    vec![
        Step::new(
            "start",
            "START",
            "Customer begins their shopping journey either by entering the physical store or accessing the online platform.",
            Start,
            0.1,
        ),
        Step::new(
            "enter",
            "Customer Enters Store / Accesses Online Store",
            "The initial touchpoint where customers engage with the bookstore through physical or digital channels.",
            Activity,
            0.2,
        ),
        Step::new(
            "browse",
            "Browse Books",
            "Customer explores available books through in-store browsing or online inventory search functionality.",
            Activity,
            0.3,
        ),
        Step::new(
            "findBook",
            "Find a book?",
            "Decision point: Has the customer found a book they want to purchase?",
            Decision,
            0.4,
        ),
        Step::new(
            "restock",
            "Place Online Order / Request Restock",
            "Alternative path for customers who don't find what they're looking for - option to place special orders or request restocking.",
            Activity,
            0.5,
        ),
        Step::new(
            "addCart",
            "Add book(s) to Cart",
            "Customer adds selected book(s) to their shopping cart, either physical collection or digital cart.",
            Activity,
            0.5,
        ),
        Step::new(
            "calculate",
            "POS System Automatically Calculates Total",
            "Point-of-sale system automatically computes the total cost including taxes and applicable discounts.",
            System,
            0.6,
        ),
        Step::new(
            "payment",
            "Select Payment Method",
            "Customer chooses their preferred payment method for the transaction.",
            Decision,
            0.7,
        ),
        Step::new(
            "cashPay",
            "Customer Pays in Cash",
            "Traditional cash payment processing for in-store transactions.",
            Activity,
            0.8,
        ),
        Step::new(
            "digitalPay",
            "Customer Pays Digitally",
            "Modern payment methods including credit/debit cards and mobile payment solutions.",
            Activity,
            0.8,
        ),
        Step::new(
            "updateSystem",
            "POS System Updates Sales + Inventory",
            "Real-time system updates to maintain accurate sales records and inventory levels.",
            System,
            0.9,
        ),
        Step::new(
            "receipt",
            "Issue Digital/Printed Receipt",
            "Generation and delivery of transaction receipt in digital or printed format.",
            Activity,
            1.0,
        ),
        Step::new(
            "delivery",
            "Customer Receives Books",
            "Final step where customer receives their purchased books, with delivery options for online orders.",
            Activity,
            1.1,
        ),
        Step::new(
            "end",
            "TRANSACTION COMPLETE",
            "Successful completion of the entire transaction process.",
            End,
            1.2,
        ),
    ]
}

fn bookstore_links() -> Vec<Link> {
    vec![
        Link::down("start", "enter"),
        Link::down("enter", "browse"),
        Link::down("browse", "findBook"),
        Link::branch("findBook", "restock", "No", LinkDirection::Left),
        Link::branch("findBook", "addCart", "Yes", LinkDirection::Right),
        Link::down("addCart", "calculate"),
        Link::down("calculate", "payment"),
        Link::branch("payment", "cashPay", "Cash", LinkDirection::Left),
        Link::branch("payment", "digitalPay", "Card/Mobile", LinkDirection::Right),
        Link::down("cashPay", "updateSystem"),
        Link::down("digitalPay", "updateSystem"),
        Link::down("updateSystem", "receipt"),
        Link::down("receipt", "delivery"),
        Link::down("delivery", "end"),
    ]
}

impl StepRegistry {
    /// The campus bookstore's transaction process.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in definition is edited into an invalid state.
    pub fn bookstore() -> Result<Self, crate::error::FlowError> {
        Self::new(bookstore_steps(), bookstore_links())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn bookstore_flow_is_valid_with_fourteen_steps() {
        let registry = StepRegistry::bookstore().expect("built-in flow should validate");
        assert_eq!(registry.len(), 14);
        assert_eq!(registry.get(0).map(|s| s.id.as_str()), Some("start"));
        assert_eq!(
            registry.get(registry.last_index()).map(|s| s.id.as_str()),
            Some("end")
        );
    }

    #[rstest]
    fn decisions_have_two_labelled_branches() {
        let registry = StepRegistry::bookstore().expect("built-in flow should validate");
        for decision in ["findBook", "payment"] {
            let labels: Vec<_> = registry
                .links_from(decision)
                .filter_map(|link| link.label.as_deref())
                .collect();
            assert_eq!(labels.len(), 2, "{decision} should branch twice");
        }
    }

    #[rstest]
    fn display_delays_are_non_negative() {
        let registry = StepRegistry::bookstore().expect("built-in flow should validate");
        assert!(registry.steps().iter().all(|s| s.display_delay >= 0.0));
    }
}

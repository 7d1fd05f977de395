//! Cart aggregate and its reducer.
//!
//! The cart is a pure data structure: an ordered line sequence, a derived
//! total, and an open/closed visibility flag for the cart sheet. Every
//! transition goes through [`reduce`], which is synchronous, total, and
//! referentially transparent - the same prior state and action always
//! produce the same result. The total is never mutated independently; it is
//! recomputed from the line set after every transition.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId};

/// A product plus the quantity of it in the cart.
///
/// Invariant: `quantity >= 1`. A line that would reach zero is removed by
/// the caller (see [`CartAction::SetQuantity`]), never stored at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product, as cached from the catalog at add time.
    pub product: Product,
    /// How many units of the product are in the cart.
    pub quantity: u32,
}

impl CartLine {
    /// Price x quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.times(self.quantity)
    }
}

/// The cart aggregate: line sequence (insertion order), derived total, and
/// the cart-sheet visibility flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Cart lines in insertion order. At most one line per product id.
    pub lines: Vec<CartLine>,
    /// Sum of price x quantity over all lines. Always recomputed, never
    /// independently mutated.
    pub total: Decimal,
    /// Whether the cart sheet is currently open.
    pub is_open: bool,
}

impl Cart {
    /// The canonical empty cart: no lines, zero total, sheet closed.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            lines: Vec::new(),
            total: Decimal::ZERO,
            is_open: false,
        }
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Find the line for a product id, if any.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product.id == id)
    }
}

/// A cart state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of a product. Merges into an existing line for the same
    /// product id (quantity + 1) rather than duplicating; otherwise appends
    /// a new line with quantity 1. Always permitted - there is no stock
    /// model.
    AddItem(Product),
    /// Drop the line with the given product id. A no-op, not an error, when
    /// the id is absent.
    RemoveItem(ProductId),
    /// Overwrite the matching line's quantity verbatim.
    ///
    /// Caller contract: a quantity below 1 must be translated to
    /// [`CartAction::RemoveItem`] before dispatch. The reducer performs no
    /// clamping.
    SetQuantity {
        id: ProductId,
        quantity: u32,
    },
    /// Flip the cart-sheet visibility flag. Lines and total are untouched.
    ToggleOpen,
    /// Reset to the canonical empty cart.
    ClearCart,
}

/// Recompute the derived total from a line set.
fn calculate_total(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_total).sum()
}

/// Apply a [`CartAction`] to a cart, yielding the next state.
#[must_use]
pub fn reduce(state: &Cart, action: CartAction) -> Cart {
    match action {
        CartAction::AddItem(product) => {
            let mut lines = state.lines.clone();
            if let Some(line) = lines.iter_mut().find(|line| line.product.id == product.id) {
                line.quantity += 1;
            } else {
                lines.push(CartLine {
                    product,
                    quantity: 1,
                });
            }
            let total = calculate_total(&lines);
            Cart {
                lines,
                total,
                is_open: state.is_open,
            }
        }

        CartAction::RemoveItem(id) => {
            let lines: Vec<CartLine> = state
                .lines
                .iter()
                .filter(|line| line.product.id != id)
                .cloned()
                .collect();
            let total = calculate_total(&lines);
            Cart {
                lines,
                total,
                is_open: state.is_open,
            }
        }

        CartAction::SetQuantity { id, quantity } => {
            let lines: Vec<CartLine> = state
                .lines
                .iter()
                .map(|line| {
                    if line.product.id == id {
                        CartLine {
                            product: line.product.clone(),
                            quantity,
                        }
                    } else {
                        line.clone()
                    }
                })
                .collect();
            let total = calculate_total(&lines);
            Cart {
                lines,
                total,
                is_open: state.is_open,
            }
        }

        CartAction::ToggleOpen => Cart {
            lines: state.lines.clone(),
            total: state.total,
            is_open: !state.is_open,
        },

        CartAction::ClearCart => Cart::empty(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Price;

    fn product(id: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_cents(cents).unwrap(),
            image: format!("/images/{id}.png"),
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            updated_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            user_id: None,
        }
    }

    #[test]
    fn test_add_item_appends_with_quantity_one() {
        let cart = reduce(&Cart::empty(), CartAction::AddItem(product("1", 4999)));
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 1);
        assert_eq!(cart.total, Decimal::new(4999, 2));
    }

    #[test]
    fn test_add_item_merges_on_existing_id() {
        let mut cart = reduce(&Cart::empty(), CartAction::AddItem(product("1", 4999)));
        cart = reduce(&cart, CartAction::AddItem(product("2", 1000)));
        cart = reduce(&cart, CartAction::AddItem(product("1", 4999)));

        // One line per distinct id, the existing line incremented by exactly 1
        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.line(&ProductId::new("1")).unwrap().quantity, 2);
        assert_eq!(cart.line(&ProductId::new("2")).unwrap().quantity, 1);
        // Other lines untouched
        assert_eq!(cart.lines[1].product.id, ProductId::new("2"));
        assert_eq!(cart.total, Decimal::new(4999 * 2 + 1000, 2));
    }

    #[test]
    fn test_add_item_sequences_keep_total_consistent() {
        let products = [product("a", 999), product("b", 2500), product("a", 999)];
        let mut cart = Cart::empty();
        for p in products {
            cart = reduce(&cart, CartAction::AddItem(p));
        }
        let expected: Decimal = cart.lines.iter().map(CartLine::line_total).sum();
        assert_eq!(cart.total, expected);
        // Exactly one line per distinct product id
        let mut ids: Vec<_> = cart.lines.iter().map(|l| l.product.id.clone()).collect();
        ids.dedup();
        assert_eq!(ids.len(), cart.lines.len());
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::empty();
        for id in ["3", "1", "2"] {
            cart = reduce(&cart, CartAction::AddItem(product(id, 100)));
        }
        let order: Vec<_> = cart.lines.iter().map(|l| l.product.id.as_str()).collect();
        assert_eq!(order, ["3", "1", "2"]);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = reduce(&Cart::empty(), CartAction::AddItem(product("1", 4999)));
        cart = reduce(&cart, CartAction::AddItem(product("2", 1000)));
        cart = reduce(&cart, CartAction::RemoveItem(ProductId::new("1")));
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].product.id, ProductId::new("2"));
        assert_eq!(cart.total, Decimal::new(1000, 2));
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let cart = reduce(&Cart::empty(), CartAction::AddItem(product("1", 4999)));
        let after = reduce(&cart, CartAction::RemoveItem(ProductId::new("missing")));
        assert_eq!(after, cart);
    }

    #[test]
    fn test_set_quantity_overwrites_verbatim() {
        let mut cart = reduce(&Cart::empty(), CartAction::AddItem(product("1", 10000)));
        cart = reduce(
            &cart,
            CartAction::SetQuantity {
                id: ProductId::new("1"),
                quantity: 5,
            },
        );
        assert_eq!(cart.lines[0].quantity, 5);
        assert_eq!(cart.total, Decimal::new(50000, 2));
    }

    #[test]
    fn test_set_quantity_on_absent_id_is_noop() {
        let cart = reduce(&Cart::empty(), CartAction::AddItem(product("1", 4999)));
        let after = reduce(
            &cart,
            CartAction::SetQuantity {
                id: ProductId::new("missing"),
                quantity: 3,
            },
        );
        assert_eq!(after, cart);
    }

    #[test]
    fn test_toggle_open_flips_flag_only() {
        let cart = reduce(&Cart::empty(), CartAction::AddItem(product("1", 4999)));
        let open = reduce(&cart, CartAction::ToggleOpen);
        assert!(open.is_open);
        assert_eq!(open.lines, cart.lines);
        assert_eq!(open.total, cart.total);
        let closed = reduce(&open, CartAction::ToggleOpen);
        assert!(!closed.is_open);
    }

    #[test]
    fn test_clear_cart_yields_canonical_empty() {
        let mut cart = reduce(&Cart::empty(), CartAction::AddItem(product("1", 4999)));
        cart = reduce(&cart, CartAction::ToggleOpen);
        let cleared = reduce(&cart, CartAction::ClearCart);
        assert_eq!(cleared, Cart::empty());
        assert!(!cleared.is_open);
    }

    #[test]
    fn test_reduce_is_referentially_transparent() {
        let cart = reduce(&Cart::empty(), CartAction::AddItem(product("1", 4999)));
        let a = reduce(&cart, CartAction::AddItem(product("2", 1000)));
        let b = reduce(&cart, CartAction::AddItem(product("2", 1000)));
        assert_eq!(a, b);
    }

    #[test]
    fn test_total_multiplies_price_by_quantity() {
        // price 100, qty 2 -> total 200
        let mut cart = reduce(&Cart::empty(), CartAction::AddItem(product("a", 10000)));
        cart = reduce(&cart, CartAction::AddItem(product("a", 10000)));
        assert_eq!(cart.total, Decimal::from(200));
    }

    #[test]
    fn test_item_count() {
        let mut cart = reduce(&Cart::empty(), CartAction::AddItem(product("1", 100)));
        cart = reduce(&cart, CartAction::AddItem(product("1", 100)));
        cart = reduce(&cart, CartAction::AddItem(product("2", 100)));
        assert_eq!(cart.item_count(), 3);
    }
}

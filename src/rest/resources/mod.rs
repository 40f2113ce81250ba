//! Storefront REST resources.
//!
//! Each module declares its endpoints, its record types and validated input
//! types, and the [`ShopClient`](crate::rest::ShopClient) operations that
//! use them:
//!
//! | Module | Operations |
//! |---|---|
//! | `auth` | `login`, `register`, `logout` |
//! | `product` | `get_products`, `search_products`, `get_product` |
//! | `cart` | `get_cart`, `add_to_cart`, `update_cart_item`, `remove_from_cart`, `clear_cart`, `get_cart_count`, `get_cart_total` |
//! | `payment_method` | `get_payment_methods`, `get_payment_method`, `add_payment_method`, `update_payment_method`, `delete_payment_method` |
//! | `order` | `checkout`, `get_orders`, `get_order`, `cancel_order` |
//! | `payment` | `initiate_payment`, `get_order_payments`, `get_payment_history` |

mod auth;
mod cart;
pub mod common;
mod order;
mod payment;
mod payment_method;
mod product;

pub use cart::{Cart, CartClearResult, CartItem, Quantity};
pub use common::{Address, DEFAULT_COUNTRY};
pub use order::{CheckoutRequest, Order, OrderStatus};
pub use payment::{Payment, PaymentStatus};
pub use payment_method::{
    CardInfo, NewPaymentMethod, PaymentMethod, PaymentMethodUpdate, DEFAULT_METHOD_TYPE,
};
pub use product::{Product, Sku};

//! The resource client: typed operations over the storefront REST API.
//!
//! This module provides:
//!
//! - **[`ShopClient`]**: one async method per REST capability
//! - **[`ApiError`]**: structured failure with [`ApiErrorKind`] and status
//! - **[`Endpoint`]** and **[`build_path`]**: endpoint tables and path templating
//! - **[`resources`]**: record types and validated inputs per resource
//!
//! Every operation follows the same template: build the path, send through
//! the gateway, then branch on status. A 2xx body is decoded per operation;
//! a 401 clears the stored token; everything else becomes an [`ApiError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use eshop_client::rest::resources::{Quantity, Sku};
//!
//! let sku = Sku::new("KAHVE-01")?;
//! let item = client.add_to_cart(&sku, Quantity::new(2)?).await?;
//! println!("{} x {}", item.quantity, item.product_sku);
//!
//! let count = client.get_cart_count().await?;
//! ```

mod client;
mod errors;
mod path;
mod response;

pub mod resources;

pub use client::ShopClient;
pub use errors::{ApiError, ApiErrorKind};
pub use path::{build_path, Endpoint};

//! # Delphi Tokens
//!
//! Tenant token generation for the Delphi search service.
//!
//! A tenant token is a signed, self-contained search credential. It embeds a
//! set of search rules and the uid of the API key it derives from, and is
//! signed with that key so the service can verify it without storing any
//! state. Handing a tenant token to a frontend lets it search a restricted
//! slice of the data without ever seeing the real API key.
//!
//! ```
//! use delphi_tokens::{generate_tenant_token, SearchRules, TenantTokenOptions};
//!
//! # fn main() -> Result<(), delphi_tokens::TokenError> {
//! let rules = SearchRules::from(vec!["movies".to_string()]);
//! let options = TenantTokenOptions::new("masterKey");
//! let token = generate_tenant_token("6a26f0cf-77cb-4f43-b5c4-2c3e9a7b1b5d", &rules, &options)?;
//! assert_eq!(token.split('.').count(), 3);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod rules;
pub mod token;

pub use error::TokenError;
pub use rules::SearchRules;
pub use token::{generate_tenant_token, TenantTokenOptions};

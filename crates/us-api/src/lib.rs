//! # us-api
//!
//! HTTP API for the user service.
//!
//! Thin axum wrapper over [`us_account::AccountService`]: it deserializes
//! requests, calls the matching account operation and maps the outcome to a
//! status code.
//!
//! ## Modules
//!
//! - [`dto`] - request and response bodies
//! - [`error`] - error types and HTTP error responses
//! - [`router`] - axum router and handlers
//! - [`state`] - shared handler state
//!
//! ## API Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/api/user` | Create a user |
//! | GET | `/api/user?minAge=&maxAge=` | List users with `minAge <= age < maxAge` |
//! | PATCH | `/api/user/{email}` | Partially update a user |
//! | DELETE | `/api/user/{email}` | Delete a user (idempotent) |
//! | POST | `/api/user/login` | Check credentials (JSON body) |
//! | GET | `/api/user/login?email=&password=` | Check credentials (query) |

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod dto;
pub mod error;
pub mod router;
pub mod state;

pub use dto::{AgeRangeParams, LoginRequest, UserRepresentation, UserRequest};
pub use error::{ApiError, ApiResult, ErrorResponse, LOGIN_FAILED_MESSAGE};
pub use router::{LOGIN_SUCCESS_MESSAGE, user_router};
pub use state::UserState;

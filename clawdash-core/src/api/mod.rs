//! Gateway REST client
//!
//! Every request carries the operator's bearer token. Non-2xx answers become
//! [`Error::Api`](crate::Error::Api) and are never retried here; callers
//! surface them inline and let the operator try again.
//!
//! ## Endpoints
//!
//! | Method | Path | Used for |
//! |--------|------|----------|
//! | GET | `/api/chat/threads` | token check |
//! | GET | `/api/chat/history` | transcript on start |
//! | POST | `/api/chat/send` | user turns and approval answers |
//! | GET | `/api/memory/list?path=` | tree listing (empty path = root) |
//! | GET | `/api/memory/read?path=` | file viewer |
//! | POST | `/api/memory/search` | search overlay |
//! | GET | `/api/jobs`, `/api/jobs/summary` | jobs tab |
//! | POST | `/api/jobs/{id}/cancel` | cancel a job |
//! | GET | `/api/extensions`, `/api/extensions/tools` | extensions tab |
//! | POST | `/api/extensions/{name}/activate\|remove` | extension actions |

mod client;

pub use client::GatewayClient;

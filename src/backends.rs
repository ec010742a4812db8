//! Model backends. Each profile binds its concrete capability types into the
//! registry; the catalog enumerates the profiles a multi-backend executable accepts.

pub mod fv3jedi;
pub mod mpasjedi;
pub mod profile;

pub use fv3jedi::{Fv3Jedi, Fv3Traits};
pub use mpasjedi::{MpasJedi, MpasTraits};
pub use profile::{BackendCatalog, BackendProfile};

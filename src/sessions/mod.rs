//! Session-scoped persistence of base URL and headers

pub mod context;
pub mod headers;
pub mod resolver;
pub mod store;

pub use context::Context;
pub use headers::HeaderSet;
pub use resolver::{resolve_session, SESSION_ID_VAR};
pub use store::{ContextStore, EnvStore, FileStore};

use crate::config::{Config, StoreKind};
use crate::context::Environment;

/// Open the store for `session` on the selected medium
pub fn open_store(
    kind: StoreKind,
    config: &Config,
    session: &str,
    env: &Environment,
) -> Box<dyn ContextStore> {
    match kind {
        StoreKind::File => Box::new(FileStore::new(config.sessions_dir(), session)),
        StoreKind::Env => {
            let vars = env.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()));
            Box::new(EnvStore::from_vars(vars))
        }
    }
}

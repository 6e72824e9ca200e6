//! Remembering how far a visitor got through the membership pages.
use crate::ClientStorage;
use crate::constants::STEP_PATH_PREFIX;

/// The membership step named by a page path: its last segment, when that
/// segment starts with `membership`.
#[must_use]
pub fn step_from_path(path: &str) -> Option<&str> {
    path.rsplit('/')
        .next()
        .filter(|segment| segment.starts_with(STEP_PATH_PREFIX))
}

/// Store the step for `path` under `key`, returning it when one was found.
pub fn record_step<S: ClientStorage>(storage: &S, key: &str, path: &str) -> Option<String> {
    let step = step_from_path(path)?;
    if let Err(err) = storage.set(key, step) {
        log::warn!("failed to record membership step `{step}`: {err}");
    }
    Some(step.to_string())
}

/// Last recorded step, if any.
pub fn last_step<S: ClientStorage>(storage: &S, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(step) => step.filter(|s| !s.is_empty()),
        Err(err) => {
            log::warn!("failed to read membership step: {err}");
            None
        }
    }
}

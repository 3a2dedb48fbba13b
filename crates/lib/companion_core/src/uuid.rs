// Locally generated module identifiers.
//
// Modules added in the builder exist locally before the server assigns a
// durable id. Placeholders carry a `local-` prefix followed by a UUIDv7 so
// they sort by creation time and never collide with server ids.

use uuid::Uuid;

/// Prefix shared by every placeholder id.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Generate a new placeholder id for a module not yet known to the server.
pub fn local_module_id() -> String {
    format!("{LOCAL_ID_PREFIX}{}", Uuid::now_v7())
}

/// Whether `id` was generated by [`local_module_id`].
pub fn is_local_id(id: &str) -> bool {
    id.starts_with(LOCAL_ID_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_ids_are_recognized() {
        let id = local_module_id();
        assert!(is_local_id(&id));
        assert!(!is_local_id("3f2b8c4e-0000-4000-8000-000000000000"));
    }

    #[test]
    fn local_ids_are_monotonic() {
        let a = local_module_id();
        let b = local_module_id();
        assert_ne!(a, b);
        assert!(b >= a);
    }
}

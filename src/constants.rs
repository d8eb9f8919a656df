// Configuration file name
pub const CONFIG_FILENAME: &str = "docmig.yaml";

// Environment overrides
pub const FAMILY_ENV_VAR: &str = "DOCMIG_FAMILY";

// Document fields shared by both families
pub const ID_FIELD: &str = "id";
pub const NAME_FIELD: &str = "name";
pub const CONTENT_FIELD: &str = "content";
pub const MIGRATIONS_FIELD: &str = "migrations";

// Legacy scalar version fields, one per family
pub const CHAIN_LEGACY_VERSION_FIELD: &str = "version";
pub const SERVICE_LEGACY_VERSION_FIELD: &str = "importVersion";

// Separator used when synthesizing names from several fields
pub const NAME_JOIN_SEPARATOR: &str = "-";

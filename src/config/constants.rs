//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Remote Attendance API
// =============================================================================

/// Default base URL of the attendance backend
pub const DEFAULT_API_BASE_URL: &str = "https://backendicarus.pontoicarus.com.br";

/// Login endpoint path
pub const LOGIN_PATH: &str = "/usuario/logar";

/// Clock event submission endpoint path
pub const CLOCK_EVENT_PATH: &str = "/ponto/bater";

/// Precision reported with every clock event
pub const CLOCK_EVENT_PRECISION: f64 = 42.5;

/// Channel tag identifying this client to the attendance service
pub const CLOCK_EVENT_METHOD: &str = "NAVEGADOR";

/// Content type sent with the clock event submission
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

// =============================================================================
// Location
// =============================================================================

/// Default IP geolocation endpoint (returns `loc: "lat,lon"`)
pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipinfo.io/json";

/// Latitude used when the location cannot be determined
pub const FALLBACK_LATITUDE: f64 = -27.572293;

/// Longitude used when the location cannot be determined
pub const FALLBACK_LONGITUDE: f64 = -48.5095271;

// =============================================================================
// HTTP
// =============================================================================

/// Default whole-request timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Credential Vault
// =============================================================================

/// Passphrase the storage key is derived from.
///
/// Embedded in the binary: this only obfuscates the password on disk,
/// anyone holding the binary can decrypt the vault.
pub const VAULT_PASSPHRASE: &str = "Dyn@";

/// Salt for the storage key derivation
pub const VAULT_SALT: &[u8] = b"pontoapp_salt_123";

/// PBKDF2-HMAC-SHA256 iteration count
pub const VAULT_KDF_ITERATIONS: u32 = 100_000;

/// Directory name under the user's configuration directory
pub const CONFIG_DIR_NAME: &str = "ponto_app";

/// Vault file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Unix permission bits applied to the vault file
pub const CONFIG_FILE_MODE: u32 = 0o600;

// =============================================================================
// Triggers
// =============================================================================

/// Delay before an automatic registration fires after startup
pub const AUTO_TRIGGER_DELAY_MS: u64 = 100;

/// Clock format used for outcome timestamps
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

// =============================================================================
// User-facing Messages
// =============================================================================

/// Default message for an accepted clock event
pub const MSG_REGISTERED: &str = "Ponto registrado com sucesso";

/// Default message for a rejected clock event with a structured body
pub const MSG_REGISTER_FAILED: &str = "Erro ao registrar ponto";

/// Message returned when a registration is already running
pub const MSG_REGISTRATION_IN_PROGRESS: &str = "Registro de ponto já em andamento";

/// Message returned after a successful vault save
pub const MSG_CONFIG_SAVED: &str = "Configuration saved successfully";

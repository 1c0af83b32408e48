//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default sort key for searches
pub const DEFAULT_SORT: &str = "default";

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default number of results shown by the CLI (0 = no limit)
pub const DEFAULT_LIMIT: usize = 0;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Default directory served under /static
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Default geolocation timeout in seconds
pub const DEFAULT_LOCATION_TIMEOUT_SECS: u64 = 10;

/// Default map style
pub const DEFAULT_MAP_STYLE: &str = "mapbox://styles/mapbox/streets-v12";

/// Marker color used when a category has no configured color
pub const DEFAULT_MARKER_COLOR: &str = "#6b7280";

/// Default image transformation applied by the CDN
pub const DEFAULT_IMAGE_TRANSFORMATION: &str = "f_auto,q_auto";

/// URL prefix for locally served fallback images
pub const DEFAULT_STATIC_IMAGE_PREFIX: &str = "/static/images";

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "google";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "moto-atlas";

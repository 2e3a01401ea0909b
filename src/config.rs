use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    pub app: AppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expires_in: i64,  // seconds
    pub refresh_token_expires_in: i64, // seconds
}

/// Credenciales con las que se asegura el usuario admin inicial al arrancar.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// URL pública del sitio, base del link de participación que va en el QR.
    pub base_url: String,
    /// PNG de fondo del talón (diseño 420×180). Si falta se dibuja el talón clásico.
    #[serde(default)]
    pub talon_background: Option<String>,
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // Intenta leer el archivo; si no existe se arma todo desde el entorno
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str)
                    .map_err(|e| format!("No se pudo parsear {config_path}: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // Sin archivo de configuración la URL de la base es obligatoria
                let database_url = get_env("DATABASE_URL")
                    .ok_or("Falta DATABASE_URL y no se encontró config.toml")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        access_token_expires_in: get_env_parse("JWT_ACCESS_EXPIRES_IN", 7200i64),
                        refresh_token_expires_in: get_env_parse(
                            "JWT_REFRESH_EXPIRES_IN",
                            2_592_000i64,
                        ),
                    },
                    admin: AdminConfig {
                        email: get_env("ADMIN_EMAIL").unwrap_or_default(),
                        password: get_env("ADMIN_PASSWORD").unwrap_or_default(),
                        display_name: get_env("ADMIN_DISPLAY_NAME"),
                    },
                    app: AppConfig {
                        base_url: get_env("APP_BASE_URL")
                            .unwrap_or_else(|| "http://localhost:3000".to_string()),
                        talon_background: get_env("TALON_BACKGROUND_PATH"),
                    },
                }
            }
            Err(e) => {
                return Err(format!("No se pudo leer {config_path}: {e}").into());
            }
        };

        // Las variables de entorno pisan al archivo incluso cuando existe
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT") {
            if let Ok(p) = v.parse() {
                config.server.port = p;
            }
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS") {
            if let Ok(mc) = v.parse() {
                config.database.max_connections = mc;
            }
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            config.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_ACCESS_EXPIRES_IN") {
            if let Ok(n) = v.parse() {
                config.jwt.access_token_expires_in = n;
            }
        }
        if let Ok(v) = env::var("JWT_REFRESH_EXPIRES_IN") {
            if let Ok(n) = v.parse() {
                config.jwt.refresh_token_expires_in = n;
            }
        }
        if let Ok(v) = env::var("ADMIN_EMAIL") {
            config.admin.email = v;
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD") {
            config.admin.password = v;
        }
        if let Ok(v) = env::var("ADMIN_DISPLAY_NAME") {
            config.admin.display_name = Some(v);
        }
        if let Ok(v) = env::var("APP_BASE_URL") {
            config.app.base_url = v;
        }
        if let Ok(v) = env::var("TALON_BACKGROUND_PATH") {
            config.app.talon_background = Some(v);
        }

        Ok(config)
    }
}

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use rolegate_core::AppError;
use rolegate_domain::{BulkPolicy, RoleCatalog, UserId};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Clone)]
pub struct ResourceQueryConfig {
    pub base_url: Url,
    pub token: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub resource_query: ResourceQueryConfig,
    pub bulk_policy: BulkPolicy,
    pub role_catalog: RoleCatalog,
    pub bootstrap_admin: Option<UserId>,
}

/// What the binary was started to do.
#[derive(Debug, Clone)]
pub enum StartupMode {
    /// `rolegate-api migrate`: apply migrations and exit. Only `DATABASE_URL` is read.
    Migrate { database_url: String },
    Serve(Box<ApiConfig>),
}

impl StartupMode {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        Self::from_lookup(migrate_only, |name| env::var(name).ok())
    }

    fn from_lookup(
        migrate_only: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let vars = EnvVars { lookup: &lookup };
        let database_url = vars.required("DATABASE_URL")?;
        if migrate_only {
            return Ok(Self::Migrate { database_url });
        }

        ApiConfig::from_vars(database_url, &vars).map(|config| Self::Serve(Box::new(config)))
    }
}

impl ApiConfig {
    fn from_vars(database_url: String, vars: &EnvVars<'_>) -> Result<Self, AppError> {
        let frontend_url = vars
            .optional("FRONTEND_URL")
            .unwrap_or_else(|| "http://localhost:3000".to_owned());

        let api_host = vars
            .optional("API_HOST")
            .unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = vars
            .optional("API_PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(3001);

        let resource_query_url = vars.required_non_empty("RESOURCE_QUERY_URL")?;
        let base_url = Url::parse(resource_query_url.trim()).map_err(|error| {
            AppError::Validation(format!("invalid RESOURCE_QUERY_URL: {error}"))
        })?;
        let timeout_secs = vars
            .parse_optional::<u64>("RESOURCE_QUERY_TIMEOUT_SECS")?
            .unwrap_or(10);

        let bulk_policy = BulkPolicy::new(
            vars.parse_optional::<u64>("ROLEGATE_BULK_LIMIT")?
                .unwrap_or(BulkPolicy::DEFAULT_LIMIT),
        );
        let role_catalog = role_catalog_from(
            vars.optional("ROLEGATE_GLOBAL_ROLES").as_deref(),
            vars.optional("ROLEGATE_RESOURCE_ROLES").as_deref(),
        )?;
        let bootstrap_admin = vars
            .optional("ROLEGATE_BOOTSTRAP_ADMIN")
            .map(UserId::new)
            .transpose()?;

        Ok(Self {
            database_url,
            frontend_url,
            api_host,
            api_port,
            resource_query: ResourceQueryConfig {
                base_url,
                token: vars.optional("RESOURCE_QUERY_TOKEN"),
                timeout: Duration::from_secs(timeout_secs.max(1)),
            },
            bulk_policy,
            role_catalog,
            bootstrap_admin,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

/// Builds the role catalog, falling back to the defaults for each unset list.
fn role_catalog_from(
    global_roles: Option<&str>,
    resource_roles: Option<&str>,
) -> Result<RoleCatalog, AppError> {
    if global_roles.is_none() && resource_roles.is_none() {
        return Ok(RoleCatalog::default());
    }

    let global_roles = global_roles.map_or_else(
        || role_list(RoleCatalog::DEFAULT_GLOBAL_ROLES.join(",").as_str()),
        role_list,
    );
    let resource_roles = resource_roles.map_or_else(
        || role_list(RoleCatalog::DEFAULT_RESOURCE_ROLES.join(",").as_str()),
        role_list,
    );

    RoleCatalog::new(global_roles, resource_roles)
}

fn role_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

struct EnvVars<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl EnvVars<'_> {
    fn required(&self, name: &str) -> Result<String, AppError> {
        (self.lookup)(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))
    }

    fn required_non_empty(&self, name: &str) -> Result<String, AppError> {
        let value = self.required(name)?;
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{name} must not be empty")));
        }

        Ok(value)
    }

    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|value| !value.trim().is_empty())
    }

    fn parse_optional<T>(&self, name: &str) -> Result<Option<T>, AppError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(name)
            .map(|value| {
                value
                    .trim()
                    .parse::<T>()
                    .map_err(|error| AppError::Validation(format!("invalid {name}: {error}")))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use rolegate_core::AppError;
    use rolegate_domain::{RoleName, RoleScope};

    use super::{StartupMode, role_catalog_from, role_list};

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name: &str| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned())
        }
    }

    #[test]
    fn role_list_trims_and_skips_blanks() {
        assert_eq!(
            role_list(" admin, ,scan ,"),
            vec!["admin".to_owned(), "scan".to_owned()]
        );
    }

    #[test]
    fn unset_lists_use_default_catalog() {
        let catalog = role_catalog_from(None, None);

        assert!(matches!(catalog, Ok(ref catalog)
            if catalog.roles(RoleScope::Resource).contains("codeviewer")));
    }

    #[test]
    fn resource_override_keeps_default_global_roles() {
        let catalog = role_catalog_from(None, Some("user,browse"));

        let Ok(catalog) = catalog else {
            panic!("catalog rejected");
        };
        let browse = RoleName::new("browse").unwrap_or_else(|error| panic!("{error}"));
        assert!(catalog.recognizes(&browse, RoleScope::Resource));
        assert!(catalog.recognizes(&RoleName::admin(), RoleScope::Global));
    }

    #[test]
    fn global_override_without_admin_is_rejected() {
        let catalog = role_catalog_from(Some("scan,provisioning"), None);

        assert!(matches!(catalog, Err(AppError::Validation(_))));
    }

    #[test]
    fn migrate_mode_only_needs_database_url() {
        let vars = [
            ("DATABASE_URL", "postgres://localhost/rolegate"),
            ("ROLEGATE_GLOBAL_ROLES", "scan"),
        ];

        let mode = StartupMode::from_lookup(true, lookup(&vars));

        assert!(matches!(mode, Ok(StartupMode::Migrate { ref database_url })
            if database_url == "postgres://localhost/rolegate"));
    }

    #[test]
    fn migrate_mode_still_requires_database_url() {
        let mode = StartupMode::from_lookup(true, lookup(&[]));

        assert!(matches!(mode, Err(AppError::Validation(ref message))
            if message.contains("DATABASE_URL")));
    }

    #[test]
    fn serve_mode_requires_resource_query_url() {
        let vars = [("DATABASE_URL", "postgres://localhost/rolegate")];

        let mode = StartupMode::from_lookup(false, lookup(&vars));

        assert!(matches!(mode, Err(AppError::Validation(ref message))
            if message.contains("RESOURCE_QUERY_URL")));
    }

    #[test]
    fn serve_mode_reads_defaults() {
        let vars = [
            ("DATABASE_URL", "postgres://localhost/rolegate"),
            ("RESOURCE_QUERY_URL", "https://search.internal"),
            ("ROLEGATE_BULK_LIMIT", "3"),
        ];

        let mode = StartupMode::from_lookup(false, lookup(&vars));

        let Ok(StartupMode::Serve(config)) = mode else {
            panic!("expected serve mode");
        };
        assert_eq!(config.api_port, 3001);
        assert_eq!(config.bulk_policy.limit(), 3);
        assert_eq!(config.resource_query.base_url.as_str(), "https://search.internal/");
        assert!(config.bootstrap_admin.is_none());
    }
}

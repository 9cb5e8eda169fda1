/// Cache-Control tuning values, in seconds.
///
/// A zero `s_maxage`/`stale_while_revalidate` value omits the directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub public_max_age_seconds: u64,
    pub private_max_age_seconds: u64,
    pub public_s_maxage_seconds: u64,
    pub public_stale_while_revalidate_seconds: u64,
    pub private_stale_while_revalidate_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            public_max_age_seconds: 60,
            private_max_age_seconds: 0,
            public_s_maxage_seconds: 300,
            public_stale_while_revalidate_seconds: 600,
            private_stale_while_revalidate_seconds: 30,
        }
    }
}

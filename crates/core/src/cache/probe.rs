use super::serialization::Result;

/// The outcome of looking an entry up in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheProbe<T> {
    Hit(T),
    Miss,
}

impl<T> CacheProbe<T> {
    pub fn is_hit(&self) -> bool {
        matches!(self, CacheProbe::Hit(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            CacheProbe::Hit(value) => Some(value),
            CacheProbe::Miss => None,
        }
    }
}

/// Decides hit or miss from a raw cache read.
///
/// Absent bytes are a miss. Present bytes are a hit if `decode` accepts them;
/// a decode failure is returned so the caller can log it and fall back to a miss.
pub fn probe<T>(
    cached: Option<&[u8]>,
    decode: impl FnOnce(&[u8]) -> Result<T>,
) -> Result<CacheProbe<T>> {
    match cached {
        Some(bytes) => decode(bytes).map(CacheProbe::Hit),
        None => Ok(CacheProbe::Miss),
    }
}

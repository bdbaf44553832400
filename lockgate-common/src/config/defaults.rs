use crate::Secret;

pub(crate) const fn _default_false() -> bool {
    false
}

#[inline]
pub(crate) fn _default_database_url() -> Secret<String> {
    Secret::new("sqlite:data/db".to_owned())
}

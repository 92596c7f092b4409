//! File-name keys for pipeline items.

/// Replace every non-alphanumeric character with `_` and lower-case the result.
///
/// Two character names with the same sanitised form would share every output
/// file, so [`crate::Script::validate`] rejects such scripts.
///
/// # Examples
///
/// ```
/// use tableau_core::sanitize_name;
///
/// assert_eq!(sanitize_name("Captain Mara-Vey"), "captain_mara_vey");
/// assert_eq!(sanitize_name("scene_001"), "scene_001");
/// assert_eq!(sanitize_name("Old Tom"), sanitize_name("old-tom"));
/// ```
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .to_lowercase()
}

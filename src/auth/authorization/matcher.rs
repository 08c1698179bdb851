/// Whether `held` contains at least one of `required`
///
/// An empty `required` list is satisfied by anyone, including a caller with no
/// role set at all. Otherwise a missing role set never matches. Comparison is
/// exact and case-sensitive.
pub fn user_has_valid_role<S: AsRef<str>>(required: &[S], held: Option<&[String]>) -> bool {
    if required.is_empty() {
        return true;
    }

    let Some(held) = held else {
        return false;
    };

    required
        .iter()
        .any(|role| held.iter().any(|name| name == role.as_ref()))
}

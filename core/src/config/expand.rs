use std::env;
use std::path::PathBuf;

const ENV_PREFIX: &str = "${env:";

/// Replace `${env:NAME}` placeholders with the value of `NAME`.
///
/// Unset variables and unterminated placeholders are kept verbatim.
pub fn expand_env_placeholders(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(ENV_PREFIX) {
        out.push_str(&rest[..start]);
        let tail = &rest[start + ENV_PREFIX.len()..];
        let Some(end) = tail.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let placeholder = &rest[start..start + ENV_PREFIX.len() + end + 1];
        match env::var(&tail[..end]) {
            Ok(value) => out.push_str(&value),
            Err(_) => out.push_str(placeholder),
        }
        rest = &tail[end + 1..];
    }

    out.push_str(rest);
    out
}

/// Expand a leading `~` (alone or followed by a separator) to the home
/// directory. `~user` forms are left alone.
pub fn expand_tilde(input: &str) -> PathBuf {
    let Some(after) = input.strip_prefix('~') else {
        return PathBuf::from(input);
    };
    if !(after.is_empty() || after.starts_with('/') || after.starts_with('\\')) {
        return PathBuf::from(input);
    }
    match dirs::home_dir() {
        Some(home) => home.join(after.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_known_variable() {
        env::set_var("UPLOADHUB_TEST_HOST", "files.lan");
        assert_eq!(
            expand_env_placeholders("http://${env:UPLOADHUB_TEST_HOST}:8080"),
            "http://files.lan:8080"
        );
        env::remove_var("UPLOADHUB_TEST_HOST");
    }

    #[test]
    fn keeps_unknown_variable() {
        let input = "${env:UPLOADHUB_SURELY_UNSET_VAR_42}/x";
        assert_eq!(expand_env_placeholders(input), input);
    }

    #[test]
    fn keeps_unterminated_placeholder() {
        assert_eq!(expand_env_placeholders("a${env:B"), "a${env:B");
    }

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(expand_env_placeholders("/uploads"), "/uploads");
        assert_eq!(expand_env_placeholders(""), "");
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~"), home);
            assert_eq!(expand_tilde("~/cfg.json"), home.join("cfg.json"));
        }
    }

    #[test]
    fn tilde_user_form_untouched() {
        assert_eq!(expand_tilde("~bob/cfg.json"), PathBuf::from("~bob/cfg.json"));
        assert_eq!(expand_tilde("/etc/cfg.json"), PathBuf::from("/etc/cfg.json"));
    }
}

/// Canonical `https://host/path` form of an SCM location as descriptors
/// write it: `scm:git:` prefixes, scp-style `git@host:owner/repo`, `ssh://`,
/// `git://` and `http(s)://` URLs. GitHub locations are cut down to
/// `owner/repo`. `None` when no host and path can be recovered.
pub fn normalize_scm_url(raw: &str) -> Option<String> {
    let mut url = raw.trim();
    while let Some(rest) = url.strip_prefix("scm:") {
        url = rest.split_once(':')?.1;
    }

    let (host, path) = match url.split_once("://") {
        Some((_, rest)) => {
            let (authority, path) = rest.split_once('/')?;
            let host = authority.rsplit('@').next().unwrap_or(authority);
            (host.split(':').next().unwrap_or(host), path)
        }
        None => {
            let (user_host, path) = url.split_once(':')?;
            let (_, host) = user_host.split_once('@')?;
            (host, path)
        }
    };

    let host = host.trim().to_ascii_lowercase();
    let path = path.trim().trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    if host.is_empty() || path.is_empty() {
        return None;
    }

    let path = if host == "github.com" {
        let segments: Vec<&str> = path.split('/').take(2).collect();
        if segments.len() < 2 {
            return None;
        }
        segments.join("/")
    } else {
        path.to_string()
    };

    Some(format!("https://{}/{}", host, path))
}

//! Server descriptor
//!
//! An SSH host identifier plus the remote root under which workspaces live.

use std::fmt;

use crate::domain::value_objects::{RemotePath, Slug};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    /// Configured name, or the raw spec for ad-hoc servers
    pub name: String,
    /// Remote host (e.g., "devbox" or "user@host")
    pub host: String,
    /// Remote base path (e.g., "~/workspaces" or "/srv/ws")
    pub root: String,
}

impl Server {
    pub fn new(name: impl Into<String>, host: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            root: root.into(),
        }
    }

    /// Parse an ad-hoc server spec.
    ///
    /// Format: "host", "host:path" or "user@host:path"
    pub fn parse(spec: &str) -> Self {
        let (host, root) = match spec.split_once(':') {
            Some((h, p)) if !p.is_empty() => (h, p),
            Some((h, _)) => (h, "."),
            None => (spec, "."),
        };
        Self::new(spec, host, root)
    }

    /// Destination directory for a workspace: `<root>/<slug>`
    pub fn destination(&self, slug: &Slug) -> RemotePath {
        RemotePath::workspace(&self.root, slug)
    }

    pub fn lock_path(&self, slug: &Slug) -> RemotePath {
        RemotePath::lock_for(&self.root, slug)
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_host() {
        let server = Server::parse("myserver");
        assert_eq!(server.host, "myserver");
        assert_eq!(server.root, ".");
    }

    #[test]
    fn parses_host_and_path() {
        let server = Server::parse("user@host:/home/project");
        assert_eq!(server.host, "user@host");
        assert_eq!(server.root, "/home/project");
    }

    #[test]
    fn parses_tilde_path() {
        let server = Server::parse("admin@192.168.1.1:~/projects");
        assert_eq!(server.host, "admin@192.168.1.1");
        assert_eq!(server.root, "~/projects");
    }

    #[test]
    fn parses_trailing_colon_as_dot() {
        let server = Server::parse("host:");
        assert_eq!(server.root, ".");
    }

    #[test]
    fn destination_appends_slug() {
        let server = Server::new("dev", "dev", "~/ws");
        let slug = Slug::new("acme").unwrap();
        assert_eq!(server.destination(&slug).as_str(), "~/ws/acme");
        assert_eq!(server.lock_path(&slug).as_str(), "~/ws/.acme.hoist-lock");
        assert_eq!(server.to_string(), "dev:~/ws");
    }
}

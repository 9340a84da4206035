//! Clone Script
//!
//! Remote repository materialization is expressed as a list of typed
//! [`RemoteAction`]s. [`CloneScript::render`] is the only place that turns them
//! into shell text, and every interpolated value goes through the shell
//! quoting helpers. The script reports per-repository outcomes as tab-separated
//! lines that [`parse_output`] reads back.

use crate::domain::entities::{RepoClonePlan, REPOS_DIR};
use crate::domain::value_objects::{shell_quote, RemotePath, RepoPath};

/// Output tag for a repository that was cloned
pub const TAG_CLONED: &str = "CLONED";
/// Output tag for a repository that was left alone
pub const TAG_SKIP: &str = "SKIP";
/// Skip reason emitted when the destination already exists
pub const REASON_EXISTS: &str = "exists";

/// One remote-side step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteAction {
    /// `mkdir -p` a workspace-relative directory; aborts the script on failure
    EnsureDir(String),
    /// Clone `url` into `dest` unless `dest` already exists
    CloneIfAbsent {
        name: String,
        dest: RepoPath,
        url: String,
    },
}

/// A shell program run from the remote workspace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneScript {
    root: RemotePath,
    actions: Vec<RemoteAction>,
}

impl CloneScript {
    pub fn new(root: RemotePath) -> Self {
        Self {
            root,
            actions: Vec::new(),
        }
    }

    /// Standard script: ensure the repository container, then one guarded
    /// clone per plan, in plan order.
    pub fn for_plans(root: &RemotePath, plans: &[RepoClonePlan]) -> Self {
        let mut script = Self::new(root.clone()).with(RemoteAction::EnsureDir(REPOS_DIR.into()));
        for plan in plans {
            script = script.with(RemoteAction::CloneIfAbsent {
                name: plan.name.clone(),
                dest: plan.path.clone(),
                url: plan.remote.clone(),
            });
        }
        script
    }

    pub fn with(mut self, action: RemoteAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn actions(&self) -> &[RemoteAction] {
        &self.actions
    }

    /// Render as POSIX `sh` source, suitable for `sh -s` on stdin.
    ///
    /// Clone failures do not stop later repositories; the script exits
    /// non-zero at the end if any clone failed.
    pub fn render(&self) -> String {
        let root = self.root.shell();
        let mut out = String::new();
        out.push_str("set -u\n");
        out.push_str("hoist_rc=0\n");
        out.push_str(&format!("mkdir -p {root} && cd {root} || exit 1\n"));

        for action in &self.actions {
            match action {
                RemoteAction::EnsureDir(dir) => {
                    out.push_str(&format!("mkdir -p {} || exit 1\n", shell_quote(dir)));
                }
                RemoteAction::CloneIfAbsent { name, dest, url } => {
                    render_clone(&mut out, name, dest, url);
                }
            }
        }

        out.push_str("exit \"$hoist_rc\"\n");
        out
    }
}

fn render_clone(out: &mut String, name: &str, dest: &RepoPath, url: &str) {
    let name = shell_quote(name);
    let path = shell_quote(dest.as_str());
    let url = shell_quote(url);

    out.push_str(&format!("if [ -e {path} ]; then\n"));
    out.push_str(&format!(
        "  printf '{TAG_SKIP}\\t%s\\t%s\\t%s\\n' {name} {path} {}\n",
        shell_quote(REASON_EXISTS)
    ));
    out.push_str("else\n");
    let mkdir_parent = dest
        .parent()
        .map(|parent| format!("mkdir -p {} && ", shell_quote(parent)))
        .unwrap_or_default();
    out.push_str(&format!(
        "  {mkdir_parent}GIT_TERMINAL_PROMPT=0 git clone --quiet -- {url} {path} </dev/null \
         && printf '{TAG_CLONED}\\t%s\\t%s\\t%s\\n' {name} {path} {url} || hoist_rc=1\n"
    ));
    out.push_str("fi\n");
}

/// A per-repository line recognized in script output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptEvent {
    Cloned {
        name: String,
        path: String,
        url: String,
    },
    Skipped {
        name: String,
        path: String,
        reason: String,
    },
}

/// Parse script output, ignoring every line that is not a well-formed
/// `CLONED` or `SKIP` record.
pub fn parse_output(output: &str) -> Vec<ScriptEvent> {
    output.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<ScriptEvent> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut fields = line.splitn(4, '\t');
    let tag = fields.next()?;
    let name = fields.next()?.to_string();
    let path = fields.next()?.to_string();
    let last = fields.next()?.to_string();

    match tag {
        TAG_CLONED => Some(ScriptEvent::Cloned {
            name,
            path,
            url: last,
        }),
        TAG_SKIP => Some(ScriptEvent::Skipped {
            name,
            path,
            reason: last,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(name: &str, path: &str, url: &str) -> RepoClonePlan {
        RepoClonePlan::new(name, RepoPath::new(path).unwrap(), url)
    }

    #[test]
    fn for_plans_ensures_repos_dir_first() {
        let root = RemotePath::new("/srv/ws/demo");
        let script = CloneScript::for_plans(&root, &[plan("a", "repos/a", "u")]);
        assert_eq!(script.actions()[0], RemoteAction::EnsureDir("repos".into()));
        assert_eq!(script.actions().len(), 2);
    }

    #[test]
    fn render_full_script() {
        let root = RemotePath::new("~/ws/demo");
        let script = CloneScript::for_plans(
            &root,
            &[plan("frontend", "repos/frontend", "git@host:org/frontend.git")],
        );

        let expected = "set -u\n\
hoist_rc=0\n\
mkdir -p \"$HOME\"/'ws/demo' && cd \"$HOME\"/'ws/demo' || exit 1\n\
mkdir -p 'repos' || exit 1\n\
if [ -e 'repos/frontend' ]; then\n\
\x20 printf 'SKIP\\t%s\\t%s\\t%s\\n' 'frontend' 'repos/frontend' 'exists'\n\
else\n\
\x20 mkdir -p 'repos' && GIT_TERMINAL_PROMPT=0 git clone --quiet -- 'git@host:org/frontend.git' 'repos/frontend' </dev/null \
&& printf 'CLONED\\t%s\\t%s\\t%s\\n' 'frontend' 'repos/frontend' 'git@host:org/frontend.git' || hoist_rc=1\n\
fi\n\
exit \"$hoist_rc\"\n";
        assert_eq!(script.render(), expected);
    }

    #[test]
    fn render_top_level_repo_skips_parent_mkdir() {
        let root = RemotePath::new("/srv/demo");
        let script = CloneScript::new(root).with(RemoteAction::CloneIfAbsent {
            name: "tool".into(),
            dest: RepoPath::new("tool").unwrap(),
            url: "https://example.com/tool.git".into(),
        });
        let rendered = script.render();
        assert!(rendered.contains("  GIT_TERMINAL_PROMPT=0 git clone --quiet -- "));
        assert!(!rendered.contains("mkdir -p 'tool'"));
    }

    #[test]
    fn render_quotes_hostile_values() {
        let root = RemotePath::new("/srv/demo");
        let script = CloneScript::for_plans(
            &root,
            &[plan(
                "x'; rm -rf / #",
                "repos/$(whoami)",
                "https://evil.example/'`id`'.git",
            )],
        );
        let rendered = script.render();
        assert!(rendered.contains("'x'\\''; rm -rf / #'"));
        assert!(rendered.contains("'repos/$(whoami)'"));
        assert!(rendered.contains("'https://evil.example/'\\''`id`'\\''.git'"));
        assert!(rendered.contains("git clone --quiet -- 'https://evil.example/"));
    }

    #[test]
    fn parse_recognizes_both_tags() {
        let output = "Cloning into 'repos/a'...\n\
CLONED\ta\trepos/a\tgit@h:o/a.git\n\
SKIP\tb\trepos/b\texists\n\
warning: something\n";
        assert_eq!(
            parse_output(output),
            vec![
                ScriptEvent::Cloned {
                    name: "a".into(),
                    path: "repos/a".into(),
                    url: "git@h:o/a.git".into(),
                },
                ScriptEvent::Skipped {
                    name: "b".into(),
                    path: "repos/b".into(),
                    reason: "exists".into(),
                },
            ]
        );
    }

    #[test]
    fn parse_ignores_noise_and_truncated_records() {
        let output = "CLONED\tonly-two\r\nSKIPPED\ta\tb\tc\nCLONED a repos/a url\n\n";
        assert!(parse_output(output).is_empty());
    }

    #[test]
    fn parse_strips_carriage_returns() {
        let events = parse_output("SKIP\ta\trepos/a\texists\r\n");
        assert_eq!(
            events,
            vec![ScriptEvent::Skipped {
                name: "a".into(),
                path: "repos/a".into(),
                reason: "exists".into(),
            }]
        );
    }
}

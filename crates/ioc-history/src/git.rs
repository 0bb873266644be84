use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use ioc_core::{HistoricalSnapshot, HistoryError, HistoryProvider, RevisionInfo};

/// Inventory history backed by a git repository.
pub struct GitHistory {
    repo: gix::Repository,
    /// Inventory path inside the repository tree.
    tree_path: PathBuf,
}

impl std::fmt::Debug for GitHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHistory")
            .field("git_dir", &self.repo.git_dir())
            .field("tree_path", &self.tree_path)
            .finish()
    }
}

impl GitHistory {
    /// Open the repository containing `repo_root`.
    ///
    /// `inventory_path` is relative to `repo_root`; an absolute path must point
    /// inside the repository work tree.
    pub fn open(repo_root: &Path, inventory_path: &Path) -> Result<Self, HistoryError> {
        let repo = gix::discover(repo_root)
            .map_err(|_| HistoryError::NotGitRepo(repo_root.to_path_buf()))?;
        let work_dir = repo
            .work_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| repo_root.to_path_buf());

        let tree_path = resolve_tree_path(&work_dir, repo_root, inventory_path)?;
        tracing::debug!(
            git_dir = %repo.git_dir().display(),
            tree_path = %tree_path.display(),
            "opened inventory history"
        );

        Ok(Self { repo, tree_path })
    }

    #[must_use]
    pub fn tree_path(&self) -> &Path {
        &self.tree_path
    }

    fn read_revision(
        &self,
        id: gix::ObjectId,
    ) -> Result<Option<HistoricalSnapshot>, HistoryError> {
        let commit = self
            .repo
            .find_commit(id)
            .map_err(|e| HistoryError::Git(format!("find commit {id}: {e}")))?;
        let tree = commit
            .tree()
            .map_err(|e| HistoryError::Git(format!("load tree of {id}: {e}")))?;

        let Some(entry) = tree
            .lookup_entry_by_path(&self.tree_path)
            .map_err(|e| HistoryError::Git(format!("look up inventory in {id}: {e}")))?
        else {
            return Ok(None);
        };
        if !entry.mode().is_blob() {
            return Ok(None);
        }

        let content = entry
            .object()
            .map_err(|e| HistoryError::Git(format!("read inventory blob in {id}: {e}")))?
            .detach()
            .data;

        let time = commit
            .time()
            .map_err(|e| HistoryError::Git(format!("decode commit time of {id}: {e}")))?;
        let timestamp = to_datetime(time.seconds, time.offset).ok_or_else(|| {
            HistoryError::Git(format!("commit {id} has an out-of-range timestamp"))
        })?;
        let author = commit
            .author()
            .map_err(|e| HistoryError::Git(format!("decode author of {id}: {e}")))?
            .name
            .to_string();

        Ok(Some(HistoricalSnapshot {
            revision: RevisionInfo::new(id.to_string(), timestamp).with_author(author),
            content,
        }))
    }
}

impl HistoryProvider for GitHistory {
    fn snapshots(&self) -> Result<Vec<HistoricalSnapshot>, HistoryError> {
        let head = self
            .repo
            .head()
            .map_err(|e| HistoryError::Git(format!("read HEAD: {e}")))?;
        let Some(head_id) = head.id() else {
            tracing::debug!("HEAD is unborn; history is empty");
            return Ok(Vec::new());
        };

        let walk = self
            .repo
            .rev_walk([head_id.detach()])
            .all()
            .map_err(|e| HistoryError::Git(format!("rev-walk: {e}")))?;

        let mut commits = Vec::new();
        for info in walk {
            let info = info.map_err(|e| HistoryError::Git(format!("rev-walk: {e}")))?;
            commits.push(info.id);
        }
        // Ancestry order, oldest first. Commit dates are not trusted for ordering.
        commits.reverse();

        let mut snapshots = Vec::with_capacity(commits.len());
        for id in commits {
            match self.read_revision(id)? {
                Some(snapshot) => snapshots.push(snapshot),
                None => tracing::trace!(commit = %id, "inventory absent; skipping"),
            }
        }

        tracing::debug!(revisions = snapshots.len(), "collected inventory history");
        Ok(snapshots)
    }
}

fn resolve_tree_path(
    work_dir: &Path,
    repo_root: &Path,
    inventory_path: &Path,
) -> Result<PathBuf, HistoryError> {
    let work_dir = work_dir.canonicalize()?;

    if inventory_path.is_absolute() {
        return inventory_path
            .strip_prefix(&work_dir)
            .map(Path::to_path_buf)
            .map_err(|_| {
                HistoryError::Git(format!(
                    "inventory '{}' is outside the repository at '{}'",
                    inventory_path.display(),
                    work_dir.display()
                ))
            });
    }

    let root = repo_root.canonicalize()?;
    let prefix = root.strip_prefix(&work_dir).unwrap_or_else(|_| Path::new(""));
    Ok(prefix.join(inventory_path))
}

fn to_datetime(seconds: i64, offset: i32) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(offset)?;
    DateTime::from_timestamp(seconds, 0).map(|utc| utc.with_timezone(&offset))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::process::Command;

    use ioc_core::{ChangeEntry, MissingIocPolicy, track_changes};
    use pretty_assertions::assert_eq;

    use super::*;

    fn run_git(repo_path: &Path, args: &[&str], date: Option<&str>) -> String {
        let mut command = Command::new("git");
        command.args(args).current_dir(repo_path);
        if let Some(date) = date {
            command
                .env("GIT_AUTHOR_DATE", date)
                .env("GIT_COMMITTER_DATE", date);
        }
        let output = command.output().expect("run git");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    fn init_temp_repo() -> tempfile::TempDir {
        let dir = tempfile::TempDir::new().expect("create tempdir");
        run_git(dir.path(), &["init", "--initial-branch=main"], None);
        run_git(dir.path(), &["config", "user.email", "ops@example.org"], None);
        run_git(dir.path(), &["config", "user.name", "Ops Bot"], None);
        dir
    }

    fn commit_file(repo_path: &Path, rel: &str, content: &str, date: &str) {
        let path = repo_path.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, content).expect("write file");
        run_git(repo_path, &["add", "-A"], None);
        run_git(
            repo_path,
            &["commit", "--allow-empty", "-m", "update"],
            Some(date),
        );
    }

    #[test]
    fn walks_inventory_history_oldest_first() {
        let dir = init_temp_repo();
        let root = dir.path();
        commit_file(root, "README", "docs", "2024-01-01T10:00:00+01:00");
        commit_file(
            root,
            "iocs.json",
            r#"[{"name": "ioc1", "host": "h1"}]"#,
            "2024-01-02T10:00:00+01:00",
        );
        commit_file(root, "README", "more docs", "2024-01-03T10:00:00+01:00");
        commit_file(
            root,
            "iocs.json",
            r#"[{"name": "ioc1", "host": "h2"}]"#,
            "2024-01-04T10:00:00+01:00",
        );

        let history = GitHistory::open(root, Path::new("iocs.json")).expect("open history");
        let snapshots = history.snapshots().expect("snapshots");

        // The first commit predates the inventory and is left out.
        assert_eq!(snapshots.len(), 3);
        assert_eq!(
            snapshots[0].revision.display_timestamp().to_string(),
            "2024-01-02 10:00:00+01:00"
        );
        assert_eq!(snapshots[0].revision.author.as_deref(), Some("Ops Bot"));

        let timeline =
            track_changes(&history, "ioc1", MissingIocPolicy::Skip).expect("timeline");
        assert_eq!(timeline.entries.len(), 2);
        assert_eq!(timeline.entries[1].changes, vec![ChangeEntry::set("host", "h2")]);

        let head = run_git(root, &["rev-parse", "HEAD"], None);
        assert_eq!(timeline.entries[1].revision.id, head.trim());
    }

    #[test]
    fn skewed_commit_dates_keep_ancestry_order() {
        let dir = init_temp_repo();
        let root = dir.path();
        commit_file(
            root,
            "iocs.json",
            r#"[{"name": "ioc1", "host": "h1"}]"#,
            "2024-01-05T10:00:00+00:00",
        );
        commit_file(
            root,
            "iocs.json",
            r#"[{"name": "ioc1", "host": "h2"}]"#,
            "2024-01-01T10:00:00+00:00",
        );

        let history = GitHistory::open(root, Path::new("iocs.json")).expect("open history");
        let timeline =
            track_changes(&history, "ioc1", MissingIocPolicy::Skip).expect("timeline");

        let hosts: Vec<_> = timeline
            .entries
            .iter()
            .map(|entry| {
                entry
                    .changes
                    .iter()
                    .find(|change| change.field == "host")
                    .map(|change| change.description().to_string())
            })
            .collect();
        assert_eq!(hosts, vec![Some("h1".to_string()), Some("h2".to_string())]);

        let head = run_git(root, &["rev-parse", "HEAD"], None);
        assert_eq!(timeline.entries[1].revision.id, head.trim());
    }

    #[test]
    fn inventory_path_is_relative_to_repo_root() {
        let dir = init_temp_repo();
        let root = dir.path();
        commit_file(
            root,
            "deploy/iocs.json",
            r#"[{"name": "ioc1", "host": "h1"}]"#,
            "2024-02-01T08:00:00+00:00",
        );

        let history = GitHistory::open(&root.join("deploy"), Path::new("iocs.json"))
            .expect("open history");
        assert_eq!(history.tree_path(), Path::new("deploy/iocs.json"));
        assert_eq!(history.snapshots().expect("snapshots").len(), 1);
    }

    #[test]
    fn unborn_head_yields_empty_history() {
        let dir = init_temp_repo();
        let history = GitHistory::open(dir.path(), Path::new("iocs.json")).expect("open history");
        assert!(history.snapshots().expect("snapshots").is_empty());
    }

    #[test]
    fn non_repository_is_reported() {
        let dir = tempfile::TempDir::new().expect("create tempdir");
        let nested = dir.path().join("not-a-repo");
        fs::create_dir_all(&nested).expect("mkdir");

        // Guard against a git repository above the temp dir.
        if gix::discover(&nested).is_ok() {
            return;
        }
        let error = GitHistory::open(&nested, Path::new("iocs.json")).expect_err("must fail");
        assert!(matches!(error, HistoryError::NotGitRepo(_)));
    }

    #[test]
    fn timestamps_keep_their_offset() {
        let ts = to_datetime(1_704_189_600, -5 * 3600).expect("valid");
        assert_eq!(ts.format("%Y-%m-%d %H:%M:%S%:z").to_string(), "2024-01-02 05:00:00-05:00");
    }
}

mod changes;
mod hosts;

use ioc_config::IocConfig;

use crate::cli::{Commands, GlobalFlags};

/// Route a parsed command to its handler.
pub fn dispatch(command: &Commands, config: &IocConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Hosts => hosts::handle(config, flags),
        Commands::Changes(args) => changes::handle(args, config, flags),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::process::Command;

    use ioc_config::IocConfig;
    use ioc_core::MissingIocPolicy;
    use pretty_assertions::assert_eq;

    use super::{changes, hosts};
    use crate::cli::{ChangesArgs, OutputFormat};

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

    /// Temp repo with `deploy/iocs.json` committed three times:
    /// ioc1 on h1, unchanged (ioc2 added), then ioc1 moved to h2.
    fn deploy_repo() -> tempfile::TempDir {
        let dir = tempfile::TempDir::new().expect("create tempdir");
        let root = dir.path();
        run_git(root, &["init", "--initial-branch=main"], None);
        run_git(root, &["config", "user.email", "ops@example.org"], None);
        run_git(root, &["config", "user.name", "Ops Bot"], None);

        let inventory = root.join("deploy").join("iocs.json");
        fs::create_dir_all(inventory.parent().expect("parent")).expect("mkdir");
        for (content, date) in [
            (
                r#"[{"name": "ioc1", "host": "h1"}]"#,
                "2024-03-01T09:00:00+01:00",
            ),
            (
                r#"[{"name": "ioc1", "host": "h1"}, {"name": "ioc2", "host": "h3"}]"#,
                "2024-03-02T09:00:00+01:00",
            ),
            (
                r#"[{"name": "ioc1", "host": "h2"}, {"name": "ioc2", "host": "h3"}]"#,
                "2024-03-03T09:00:00+01:00",
            ),
        ] {
            fs::write(&inventory, content).expect("write inventory");
            run_git(root, &["add", "-A"], None);
            run_git(root, &["commit", "-m", "update iocs"], Some(date));
        }
        dir
    }

    fn config_for(root: &Path) -> IocConfig {
        let mut config = IocConfig::default();
        config.history.repo_root = root.to_path_buf();
        config.inventory.path = "deploy/iocs.json".into();
        config
    }

    fn changes_args(name: &str) -> ChangesArgs {
        ChangesArgs {
            name: name.to_string(),
            author: false,
            missing: None,
        }
    }

    #[test]
    fn hosts_reads_inventory_under_repo_root() {
        let dir = deploy_repo();
        let rendered = hosts::run(&config_for(dir.path()), OutputFormat::Text).expect("hosts");
        assert_eq!(rendered, "h2\nh3\n");
    }

    #[test]
    fn hosts_reports_missing_inventory() {
        let dir = tempfile::TempDir::new().expect("create tempdir");
        let error = hosts::run(&config_for(dir.path()), OutputFormat::Text).expect_err("must fail");
        assert!(format!("{error:#}").contains("failed to load inventory"));
    }

    #[test]
    fn changes_prints_classic_layout() {
        let dir = deploy_repo();
        let rendered = changes::run(&changes_args("ioc1"), &config_for(dir.path()), OutputFormat::Text)
            .expect("changes");

        assert_eq!(
            rendered,
            "\n2024-03-01 09:00:00+01:00\n  host: h1\n  name: ioc1\n\
             \n2024-03-03 09:00:00+01:00\n  host: h2\n"
        );
    }

    #[test]
    fn changes_shows_author_from_config() {
        let dir = deploy_repo();
        let mut config = config_for(dir.path());
        config.history.show_author = true;

        let rendered = changes::run(&changes_args("ioc2"), &config, OutputFormat::Text)
            .expect("changes");
        assert_eq!(
            rendered,
            "\n2024-03-02 09:00:00+01:00  Ops Bot\n  host: h3\n  name: ioc2\n"
        );
    }

    #[test]
    fn changes_missing_flag_overrides_config() {
        let dir = deploy_repo();
        let config = config_for(dir.path());
        assert_eq!(config.history.missing_ioc, MissingIocPolicy::Skip);

        let mut args = changes_args("ioc2");
        args.missing = Some(MissingIocPolicy::Error);
        let error = changes::run(&args, &config, OutputFormat::Text).expect_err("must fail");
        assert!(format!("{error:#}").contains("not found in revision"));
    }

    #[test]
    fn changes_unknown_ioc_fails() {
        let dir = deploy_repo();
        let error = changes::run(&changes_args("ghost"), &config_for(dir.path()), OutputFormat::Json)
            .expect_err("must fail");
        assert!(format!("{error:#}").contains("not found in any revision"));
    }
}

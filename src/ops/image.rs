use std::env;
use std::io;
use std::path::{Path, PathBuf};

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use tracing::{info, warn};

use super::runner::CommandRunner;

/// Scoped working-directory change. Restores the previous directory when
/// dropped, on success and error paths alike.
struct WorkingDirGuard {
    previous: PathBuf,
}

impl WorkingDirGuard {
    fn change_to(dir: &Path) -> io::Result<Self> {
        let previous = env::current_dir()?;
        env::set_current_dir(dir)?;
        Ok(WorkingDirGuard { previous })
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(err) = env::set_current_dir(&self.previous) {
            warn!(%err, "failed to restore working directory");
        }
    }
}

/// Build `image_name` from the Dockerfile in `dockerfile_dir`, then push it,
/// tagging for `registry` first when one is given. A failed build skips the
/// push entirely.
pub fn build_and_push(
    runner: &mut dyn CommandRunner,
    engine: &str,
    dockerfile_dir: &Path,
    image_name: &str,
    registry: Option<&str>,
) -> Result<()> {
    build(runner, engine, dockerfile_dir, image_name)?;
    push(runner, engine, image_name, registry)
}

/// Run the engine's build inside `dockerfile_dir` with tag `image_name`.
/// Prerequisites are checked before any side effect.
pub fn build(
    runner: &mut dyn CommandRunner,
    engine: &str,
    dockerfile_dir: &Path,
    image_name: &str,
) -> Result<()> {
    if !dockerfile_dir.exists() {
        return Err(eyre!(
            "Dockerfile directory {} does not exist",
            dockerfile_dir.display()
        ));
    }
    if !dockerfile_dir.join("Dockerfile").exists() {
        return Err(eyre!("no Dockerfile in {}", dockerfile_dir.display()));
    }

    info!(image = image_name, dir = %dockerfile_dir.display(), "building image");
    let _cwd = WorkingDirGuard::change_to(dockerfile_dir)
        .wrap_err_with(|| format!("entering {}", dockerfile_dir.display()))?;
    let ok = runner
        .run(engine, &["build", "-t", image_name, "."])
        .wrap_err("running image build")?;
    if !ok {
        return Err(eyre!("image build failed for {image_name}"));
    }
    info!(image = image_name, "image built");
    Ok(())
}

/// Push `image_name`, re-tagged as `<registry>/<image_name>` when a registry
/// is given. A failed tag aborts the push.
pub fn push(
    runner: &mut dyn CommandRunner,
    engine: &str,
    image_name: &str,
    registry: Option<&str>,
) -> Result<()> {
    let pushed = match registry {
        Some(registry) => {
            let tagged = format!("{registry}/{image_name}");
            info!(from = image_name, to = %tagged, "tagging image");
            let ok = runner
                .run(engine, &["tag", image_name, &tagged])
                .wrap_err("running image tag")?;
            if !ok {
                return Err(eyre!("tagging {image_name} as {tagged} failed"));
            }
            tagged
        }
        None => image_name.to_string(),
    };

    info!(image = %pushed, "pushing image");
    let ok = runner
        .run(engine, &["push", &pushed])
        .wrap_err("running image push")?;
    if !ok {
        return Err(eyre!("pushing {pushed} failed"));
    }
    info!(image = %pushed, "image pushed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::runner::testing::ScriptedRunner;
    use std::fs;

    #[test]
    fn build_rejects_missing_directory_before_any_command() {
        let mut runner = ScriptedRunner::new();
        let missing = std::env::temp_dir().join("opskit_image_no_such_dir");
        let _ = fs::remove_dir_all(&missing);

        let err = build(&mut runner, "docker", &missing, "app:1.0").unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        assert!(runner.calls.is_empty());
    }

    #[test]
    fn build_rejects_directory_without_dockerfile() {
        let dir = std::env::temp_dir().join("opskit_image_no_dockerfile");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        let mut runner = ScriptedRunner::new();
        let err = build(&mut runner, "docker", &dir, "app:1.0").unwrap_err();
        assert!(err.to_string().contains("no Dockerfile"));
        assert!(runner.calls.is_empty());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn push_with_registry_tags_first() {
        let mut runner = ScriptedRunner::new();
        push(&mut runner, "docker", "app:1.0", Some("registry.local")).unwrap();

        assert_eq!(
            runner.calls,
            vec![
                vec!["docker", "tag", "app:1.0", "registry.local/app:1.0"]
                    .into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>(),
                vec!["docker", "push", "registry.local/app:1.0"]
                    .into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>(),
            ]
        );
    }

    #[test]
    fn push_without_registry_uses_the_source_name() {
        let mut runner = ScriptedRunner::new();
        push(&mut runner, "docker", "app:1.0", None).unwrap();

        assert_eq!(runner.calls.len(), 1);
        assert_eq!(runner.calls[0], ["docker", "push", "app:1.0"]);
    }

    #[test]
    fn tag_failure_aborts_the_push() {
        let mut runner = ScriptedRunner::new();
        runner.script_run(false);

        let err = push(&mut runner, "docker", "app:1.0", Some("registry.local")).unwrap_err();
        assert!(err.to_string().contains("tagging"));
        assert_eq!(runner.calls.len(), 1);
    }

    // Working-directory phases share process-global state, so they run
    // inside one test.
    #[test]
    fn build_scopes_the_working_directory_change() {
        let dir = std::env::temp_dir().join("opskit_image_build_ctx");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Dockerfile"), "FROM scratch\n").unwrap();

        let before = env::current_dir().unwrap();

        // Successful build: the engine runs inside the Dockerfile directory
        // and the previous directory comes back afterwards.
        let mut runner = ScriptedRunner::new();
        build(&mut runner, "docker", &dir, "app:1.0").unwrap();
        assert_eq!(runner.calls[0], ["docker", "build", "-t", "app:1.0", "."]);
        assert_eq!(env::current_dir().unwrap(), before);

        // Failed build: restored all the same, and no further commands.
        let mut runner = ScriptedRunner::new();
        runner.script_run(false);
        let err =
            build_and_push(&mut runner, "docker", &dir, "app:1.0", Some("r.local")).unwrap_err();
        assert!(err.to_string().contains("build failed"));
        assert_eq!(runner.calls.len(), 1);
        assert_eq!(env::current_dir().unwrap(), before);

        let _ = fs::remove_dir_all(&dir);
    }
}

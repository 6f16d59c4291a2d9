use std::env;
use std::io::Write;
use std::path::Path;

use super::{Command, CommandError, Outcome};
use crate::core::context::ExecutionContext;
use crate::path::PathExpander;

#[derive(Clone, Copy, Default)]
pub struct CdCommand;

impl Command for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn description(&self) -> &'static str {
        "Change the current directory, or go home when no directory is given."
    }

    fn usage(&self) -> &'static str {
        "cd [directory]"
    }

    fn execute(
        &self,
        args: &[String],
        ctx: &mut ExecutionContext,
        _out: &mut dyn Write,
    ) -> Result<Outcome, CommandError> {
        let home = ctx.home_dir();
        let target = match args.get(1) {
            Some(dir) => {
                let expander = PathExpander::new(home.clone());
                if home.is_none() && expander.is_home_path(dir) {
                    return Err(CommandError::HomeDirNotFound);
                }
                expander.expand(dir)
            }
            None => home.ok_or(CommandError::HomeDirNotFound)?,
        };

        let previous = env::current_dir().ok();
        env::set_current_dir(&target).map_err(|source| CommandError::DirectoryChange {
            path: target,
            source,
        })?;

        // Children inherit these, so keep them in step with the real cwd.
        if let Some(previous) = previous.as_deref().and_then(Path::to_str) {
            ctx.set("OLDPWD", previous);
        }
        if let Some(current) = env::current_dir()?.to_str() {
            ctx.set("PWD", current);
        }
        Ok(Outcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::cwd_lock;

    fn cd(ctx: &mut ExecutionContext, words: &[&str]) -> Result<Outcome, CommandError> {
        let args: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        CdCommand.execute(&args, ctx, &mut Vec::new())
    }

    #[test]
    fn test_cd_to_directory() -> Result<(), Box<dyn std::error::Error>> {
        let _guard = cwd_lock();
        let dir = tempfile::tempdir()?;
        let target = dir.path().canonicalize()?;
        let mut ctx = ExecutionContext::new();

        cd(&mut ctx, &["cd", target.to_str().ok_or("non utf-8 path")?])?;
        assert_eq!(env::current_dir()?, target);
        Ok(())
    }

    #[test]
    fn test_cd_updates_pwd_and_oldpwd() -> Result<(), Box<dyn std::error::Error>> {
        let _guard = cwd_lock();
        let first_dir = tempfile::tempdir()?;
        let first = first_dir.path().canonicalize()?;
        let second = tempfile::tempdir()?;
        let second_path = second.path().canonicalize()?;
        let mut ctx = ExecutionContext::new();
        ctx.set("PWD", "/stale");

        cd(&mut ctx, &["cd", first.to_str().ok_or("non utf-8 path")?])?;
        cd(&mut ctx, &["cd", second_path.to_str().ok_or("non utf-8 path")?])?;

        assert_eq!(ctx.get("PWD"), second_path.to_str());
        assert_eq!(ctx.get("OLDPWD"), first.to_str());
        Ok(())
    }

    #[test]
    fn test_failed_cd_keeps_pwd() {
        let _guard = cwd_lock();
        let mut ctx = ExecutionContext::new();
        ctx.set("PWD", "/kept");

        assert!(cd(&mut ctx, &["cd", "/nonexistent/path"]).is_err());
        assert_eq!(ctx.get("PWD"), Some("/kept"));
        assert_eq!(ctx.get("OLDPWD"), None);
    }

    #[test]
    fn test_cd_without_argument_goes_home() -> Result<(), Box<dyn std::error::Error>> {
        let _guard = cwd_lock();
        let home = tempfile::tempdir()?;
        let home_path = home.path().canonicalize()?;
        let mut ctx = ExecutionContext::new();
        ctx.set("HOME", home_path.to_str().ok_or("non utf-8 path")?);

        cd(&mut ctx, &["cd"])?;
        assert_eq!(env::current_dir()?, home_path);
        Ok(())
    }

    #[test]
    fn test_cd_tilde_path() -> Result<(), Box<dyn std::error::Error>> {
        let _guard = cwd_lock();
        let home = tempfile::tempdir()?;
        let home_path = home.path().canonicalize()?;
        std::fs::create_dir(home_path.join("projects"))?;
        let mut ctx = ExecutionContext::new();
        ctx.set("HOME", home_path.to_str().ok_or("non utf-8 path")?);

        cd(&mut ctx, &["cd", "~/projects"])?;
        assert_eq!(env::current_dir()?, home_path.join("projects"));
        Ok(())
    }

    #[test]
    fn test_cd_invalid_leaves_cwd_unchanged() -> Result<(), Box<dyn std::error::Error>> {
        let _guard = cwd_lock();
        let before = env::current_dir()?;
        let mut ctx = ExecutionContext::new();

        let result = cd(&mut ctx, &["cd", "/nonexistent/path"]);
        assert!(matches!(result, Err(CommandError::DirectoryChange { .. })));
        assert_eq!(env::current_dir()?, before);
        Ok(())
    }

    #[test]
    fn test_cd_into_file_fails() -> Result<(), Box<dyn std::error::Error>> {
        let _guard = cwd_lock();
        let dir = tempfile::tempdir()?;
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x")?;
        let before = env::current_dir()?;

        let result = cd(&mut ExecutionContext::new(), &["cd", file.to_str().ok_or("non utf-8 path")?]);
        assert!(matches!(result, Err(CommandError::DirectoryChange { .. })));
        assert_eq!(env::current_dir()?, before);
        Ok(())
    }
}

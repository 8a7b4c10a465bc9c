//! Environment normalization helpers.

use std::process::Command;

/// Shared environment helper utilities.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvHelper;

impl EnvHelper {
    /// Environment pairs that keep `git` from waiting on interactive input.
    ///
    /// CI runners have no terminal attached, so a credential prompt would hang the job instead of
    /// failing the fetch.
    pub fn git_noninteractive_pairs() -> [(&'static str, &'static str); 2] {
        [("GIT_TERMINAL_PROMPT", "0"), ("GIT_ASKPASS", "echo")]
    }

    /// Apply non-interactive git settings to a command.
    pub fn apply_git_noninteractive(&self, cmd: &mut Command) {
        for (key, value) in Self::git_noninteractive_pairs() {
            cmd.env(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn git_noninteractive_disables_terminal_prompt() {
        let pairs = EnvHelper::git_noninteractive_pairs();
        assert!(pairs.contains(&("GIT_TERMINAL_PROMPT", "0")));
    }

    #[test]
    fn apply_git_noninteractive_sets_command_env() {
        let mut cmd = Command::new("git");
        EnvHelper.apply_git_noninteractive(&mut cmd);
        let envs = cmd
            .get_envs()
            .filter_map(|(key, value)| Some((key.to_str()?, value?.to_str()?)))
            .collect::<Vec<_>>();
        assert!(envs.contains(&("GIT_TERMINAL_PROMPT", "0")));
    }
}

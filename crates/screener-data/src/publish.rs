//! 스크리닝 결과 게시.
//!
//! 결과 파일을 원자적으로 쓰고, 설정되어 있으면 Git에 커밋 후 푸시합니다.
//! Git 게시 실패는 로그로 남기고 보고서에만 기록하며 결과 파일은 유효하게 유지됩니다.

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use screener_core::{GitPublishConfig, OutputConfig, ScreeningRun};

use crate::error::{DataError, Result};
use crate::storage::write_artifact;

/// Git 커밋 메시지를 생성합니다.
pub fn commit_message(count: usize, at: NaiveDateTime) -> String {
    format!(
        "Auto update screening results: {} stocks at {}",
        count,
        at.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Git 게시 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum GitOutcome {
    /// 비활성화됨
    Disabled,
    /// 커밋 및 푸시 완료
    Pushed,
    /// 실패 (결과 파일은 유효)
    Failed(String),
}

/// 게시 보고서.
#[derive(Debug, Clone, Serialize)]
pub struct PublishReport {
    pub artifact: PathBuf,
    pub result_count: usize,
    /// 취소되어 부분 결과를 게시했는지 여부
    pub partial: bool,
    pub git: GitOutcome,
}

/// `git add` → `git commit` → `git push` 실행기.
#[derive(Debug, Clone)]
pub struct GitPublisher {
    repo_dir: PathBuf,
    remote: Option<String>,
    branch: Option<String>,
}

impl GitPublisher {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            remote: None,
            branch: None,
        }
    }

    pub fn from_config(repo_dir: impl Into<PathBuf>, config: &GitPublishConfig) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            remote: config.remote.clone(),
            branch: config.branch.clone(),
        }
    }

    fn push_args(&self) -> Vec<&str> {
        let mut args = vec!["push"];
        if let Some(remote) = &self.remote {
            args.push(remote);
            if let Some(branch) = &self.branch {
                args.push(branch);
            }
        }
        args
    }

    /// 결과 파일을 커밋하고 푸시합니다.
    ///
    /// git은 `repo_dir`에서 실행되므로 결과 파일 경로는 절대 경로로 바꿔 전달합니다.
    pub async fn publish(&self, artifact: &Path, message: &str) -> Result<()> {
        let artifact = tokio::fs::canonicalize(artifact)
            .await
            .map_err(|e| DataError::GitFailed {
                step: "add",
                detail: format!("{}: {}", artifact.display(), e),
            })?;
        let artifact = artifact.to_string_lossy();
        self.git("add", &["add", artifact.as_ref()]).await?;
        self.git("commit", &["commit", "-m", message]).await?;
        self.git("push", &self.push_args()).await?;
        Ok(())
    }

    async fn git(&self, step: &'static str, args: &[&str]) -> Result<()> {
        tracing::debug!(step, ?args, "git 실행");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| DataError::GitFailed {
                step,
                detail: e.to_string(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(DataError::GitFailed {
                step,
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// 결과 게시기.
#[derive(Debug, Clone)]
pub struct ResultPublisher {
    path: PathBuf,
    git: Option<GitPublisher>,
}

impl ResultPublisher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            git: None,
        }
    }

    /// Git 게시를 활성화합니다.
    pub fn with_git(mut self, git: GitPublisher) -> Self {
        self.git = Some(git);
        self
    }

    /// 출력 설정에서 생성합니다. Git 저장소는 결과 파일이 있는 디렉토리입니다.
    pub fn from_config(config: &OutputConfig) -> Self {
        let publisher = Self::new(&config.path);
        if !config.git.enabled {
            return publisher;
        }
        let repo_dir = match config.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        publisher.with_git(GitPublisher::from_config(repo_dir, &config.git))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 실행 결과를 게시합니다. 결과 파일 쓰기 실패만 에러로 반환합니다.
    pub async fn publish(&self, run: &ScreeningRun) -> Result<PublishReport> {
        if run.cancelled {
            tracing::warn!(count = run.results.len(), "취소된 실행의 부분 결과 게시");
        }

        if let Err(e) = write_artifact(&self.path, &run.results) {
            tracing::error!(path = %self.path.display(), error = %e, "결과 파일 저장 실패");
            return Err(e);
        }

        let git = match &self.git {
            None => {
                tracing::info!("Git 자동 게시 비활성화, 건너뜀");
                GitOutcome::Disabled
            }
            Some(git) => {
                let message = commit_message(run.results.len(), Local::now().naive_local());
                match git.publish(&self.path, &message).await {
                    Ok(()) => {
                        tracing::info!(message = %message, "Git 커밋 및 푸시 완료");
                        GitOutcome::Pushed
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Git 자동 게시 실패");
                        GitOutcome::Failed(e.to_string())
                    }
                }
            }
        };

        Ok(PublishReport {
            artifact: self.path.clone(),
            result_count: run.results.len(),
            partial: run.cancelled,
            git,
        })
    }
}

use std::path::{Path, PathBuf};

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{BranchType, Repository};

use crate::error::CovmapError;

/// A checkout that can be put back to a known state between tests.
pub trait WorkingTree {
    fn root(&self) -> &Path;

    /// Postcondition: tracked files and HEAD match the baseline ref, whatever
    /// the previous test left behind. Ignored files (build output) survive.
    fn reset_to_baseline(&self) -> Result<(), CovmapError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acquired {
    pub dir: PathBuf,
    pub cloned: bool,
}

/// Directory name of an existing local checkout (so `.` and `..` resolve to a
/// real name), otherwise the last segment of the URL or path, ignoring
/// trailing slashes.
pub fn repository_name(source: &str) -> String {
    local_directory_name(source).unwrap_or_else(|| {
        source
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(source)
            .to_string()
    })
}

fn local_directory_name(source: &str) -> Option<String> {
    let local = Path::new(source);
    if !local.is_dir() {
        return None;
    }
    let absolute = dunce::canonicalize(local).ok()?;
    absolute
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
}

pub fn checkout_dir(source: &str, workspace_dir: &Path) -> PathBuf {
    workspace_dir.join(repository_name(source))
}

/// Clones `source` into `<workspace_dir>/<name>` unless that directory exists.
pub fn acquire_checkout(source: &str, workspace_dir: &Path) -> Result<Acquired, CovmapError> {
    let dir = checkout_dir(source, workspace_dir);
    if dir.exists() {
        return Ok(Acquired { dir, cloned: false });
    }
    std::fs::create_dir_all(workspace_dir).map_err(|e| CovmapError::io(workspace_dir, e))?;
    let url = match dunce::canonicalize(source) {
        Ok(local) if local.is_dir() => local.to_string_lossy().to_string(),
        _ => source.to_string(),
    };
    RepoBuilder::new()
        .clone(&url, &dir)
        .map_err(|e| CovmapError::git("clone", &dir, e))?;
    tracing::info!(source, dir = %dir.display(), "cloned repository");
    Ok(Acquired { dir, cloned: true })
}

pub struct GitCheckout {
    repo: Repository,
    root: PathBuf,
    baseline: String,
}

impl std::fmt::Debug for GitCheckout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitCheckout")
            .field("root", &self.root)
            .field("baseline", &self.baseline)
            .finish()
    }
}

impl GitCheckout {
    /// Opens the checkout at `dir`. Without an explicit `baseline`, the branch
    /// HEAD points to right now (or its commit, when detached) becomes the
    /// baseline for the whole run.
    pub fn open(dir: &Path, baseline: Option<&str>) -> Result<Self, CovmapError> {
        let repo = Repository::open(dir).map_err(|e| CovmapError::git("open", dir, e))?;
        let root = repo
            .workdir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dir.to_path_buf());
        let baseline = match baseline {
            Some(name) => name.to_string(),
            None => current_head(&repo).map_err(|e| CovmapError::git("head", dir, e))?,
        };
        Ok(Self {
            repo,
            root,
            baseline,
        })
    }

    pub fn baseline(&self) -> &str {
        &self.baseline
    }
}

impl WorkingTree for GitCheckout {
    fn root(&self) -> &Path {
        &self.root
    }

    fn reset_to_baseline(&self) -> Result<(), CovmapError> {
        let object = self
            .repo
            .revparse_single(&self.baseline)
            .map_err(|e| CovmapError::git("revparse", &self.root, e))?;
        let mut checkout = CheckoutBuilder::new();
        checkout.force();
        self.repo
            .checkout_tree(&object, Some(&mut checkout))
            .map_err(|e| CovmapError::git("checkout", &self.root, e))?;

        let branch_ref = self
            .repo
            .find_branch(&self.baseline, BranchType::Local)
            .ok()
            .and_then(|branch| branch.get().name().map(str::to_string));
        let moved = match branch_ref {
            Some(name) => self.repo.set_head(&name),
            None => {
                let commit = object
                    .peel_to_commit()
                    .map_err(|e| CovmapError::git("peel", &self.root, e))?;
                self.repo.set_head_detached(commit.id())
            }
        };
        moved.map_err(|e| CovmapError::git("set-head", &self.root, e))?;

        tracing::debug!(baseline = %self.baseline, "reset working tree");
        Ok(())
    }
}

fn current_head(repo: &Repository) -> Result<String, git2::Error> {
    let head = repo.head()?;
    if head.is_branch() {
        if let Some(name) = head.shorthand() {
            return Ok(name.to_string());
        }
    }
    Ok(head.peel_to_commit()?.id().to_string())
}

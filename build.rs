//! Build script for rankscan: stamps dev builds with the git commit.
//!
//! `rankscan --version` prints `0.1.0 (abc1234)` when `VERGEN_GIT_SHA`
//! holds a hash. Outside a git checkout, such as a source tarball, the
//! variable is set to `unknown` and `main.rs` prints the bare package
//! version. Builds with `--features release` emit nothing.

fn main() {
    #[cfg(not(feature = "release"))]
    emit_git_sha();
}

#[cfg(not(feature = "release"))]
fn emit_git_sha() {
    use vergen_gitcl::{Emitter, GitclBuilder};

    let emitted = GitclBuilder::default()
        .sha(true)
        .build()
        .map_err(|e| e.to_string())
        .and_then(|git| {
            Emitter::default()
                .add_instructions(&git)
                .and_then(|emitter| emitter.emit())
                .map_err(|e| e.to_string())
        });

    if let Err(e) = emitted {
        println!("cargo:warning=No git commit for --version: {}", e);
        println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
    }
}

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use semver::Version;

use super::config::SweepStats;
use super::prune::protected_versions;
use super::walker::recover;
use crate::error::SweepError;
use crate::logging::Logger;

fn version_map(names: &[&str]) -> BTreeMap<Version, PathBuf> {
    names
        .iter()
        .map(|name| {
            let version = Version::parse(name).expect("test version must parse");
            (version, PathBuf::from(format!("/cache/pkg/{name}")))
        })
        .collect()
}

fn v(name: &str) -> Version {
    Version::parse(name).unwrap()
}

#[test]
fn test_protected_empty_package() {
    let versions = version_map(&[]);
    let (release, prerelease) = protected_versions(&versions);
    assert_eq!(release, None);
    assert_eq!(prerelease, None);
}

#[test]
fn test_protected_releases_only() {
    let versions = version_map(&["1.0.0", "1.1.0", "2.0.0"]);
    let (release, prerelease) = protected_versions(&versions);
    assert_eq!(release, Some(v("2.0.0")));
    assert_eq!(prerelease, None);
}

#[test]
fn test_protected_prerelease_older_than_release() {
    // The prerelease is not newer than the newest release, so only the
    // release is protected.
    let versions = version_map(&["1.0.0-rc.1", "1.0.0", "1.1.0"]);
    let (release, prerelease) = protected_versions(&versions);
    assert_eq!(release, Some(v("1.1.0")));
    assert_eq!(prerelease, None);
}

#[test]
fn test_protected_prerelease_newer_than_release() {
    let versions = version_map(&["1.0.0", "1.1.0", "2.0.0-beta"]);
    let (release, prerelease) = protected_versions(&versions);
    assert_eq!(release, Some(v("1.1.0")));
    assert_eq!(prerelease, Some(v("2.0.0-beta")));
}

#[test]
fn test_protected_prereleases_only() {
    let versions = version_map(&["1.0.0-beta", "1.1.0-beta", "2.0.0-beta"]);
    let (release, prerelease) = protected_versions(&versions);
    assert_eq!(release, None);
    assert_eq!(prerelease, Some(v("2.0.0-beta")));
}

#[test]
fn test_protected_single_version() {
    let versions = version_map(&["3.2.1"]);
    let (release, prerelease) = protected_versions(&versions);
    assert_eq!(release, Some(v("3.2.1")));
    assert_eq!(prerelease, None);
}

#[test]
fn test_protected_build_metadata_is_release() {
    // Build metadata does not make a version a prerelease.
    let versions = version_map(&["1.0.0+sha.5114f85", "1.0.0-alpha"]);
    let (release, prerelease) = protected_versions(&versions);
    assert_eq!(release, Some(v("1.0.0+sha.5114f85")));
    assert_eq!(prerelease, None);
}

#[test]
fn test_prerelease_precedence_ordering() {
    // A release always outranks a prerelease of the same triple.
    let versions = version_map(&["2.0.0-rc.2", "2.0.0"]);
    let (release, prerelease) = protected_versions(&versions);
    assert_eq!(release, Some(v("2.0.0")));
    assert_eq!(prerelease, None);
}

#[test]
fn test_directory_io_errors_are_recoverable() {
    let log = Logger::new(0, true);
    let mut stats = SweepStats::default();
    let err = SweepError::IoError {
        path: PathBuf::from("/cache/some.package"),
        source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    };

    let result = recover(Err(err), Path::new("/cache/some.package"), &log, &mut stats);
    assert!(result.is_ok());
    assert_eq!(stats.failures, 1);
}

#[test]
fn test_structural_errors_stay_fatal() {
    let log = Logger::new(0, true);
    let mut stats = SweepStats::default();

    let duplicate = SweepError::DuplicateVersion {
        package: PathBuf::from("/cache/some.package"),
        version: v("1.0.0"),
    };
    assert!(recover(Err(duplicate), Path::new("/cache/some.package"), &log, &mut stats).is_err());

    let orphan = SweepError::MissingParent(PathBuf::from("/"));
    assert!(recover(Err(orphan), Path::new("/"), &log, &mut stats).is_err());

    assert_eq!(stats.failures, 0);
}

// Property test strategies

fn version_strategy() -> impl Strategy<Value = Version> {
    (
        0u64..4,
        0u64..4,
        0u64..4,
        prop::option::of(prop::sample::select(vec!["alpha", "beta.2", "rc.1"])),
    )
        .prop_map(|(major, minor, patch, pre)| {
            let mut version = Version::new(major, minor, patch);
            if let Some(pre) = pre {
                version.pre = semver::Prerelease::new(pre).unwrap();
            }
            version
        })
}

fn version_set_strategy() -> impl Strategy<Value = BTreeMap<Version, PathBuf>> {
    prop::collection::btree_set(version_strategy(), 0..12).prop_map(|set| {
        set.into_iter()
            .map(|version| {
                let path = PathBuf::from(format!("/cache/pkg/{version}"));
                (version, path)
            })
            .collect()
    })
}

proptest! {
    /// The protected set holds zero, one, or two versions, and holds two
    /// exactly when a release exists alongside a strictly newer
    /// prerelease.
    #[test]
    fn test_protected_set_cardinality(versions in version_set_strategy()) {
        let (release, prerelease) = protected_versions(&versions);

        let count = release.iter().count() + prerelease.iter().count();
        prop_assert!(count <= 2);

        let newest_release = versions.keys().rev().find(|v| v.pre.is_empty());
        let expect_two = match newest_release {
            Some(rel) => versions.keys().any(|v| !v.pre.is_empty() && v > rel),
            None => false,
        };
        prop_assert_eq!(count == 2, expect_two);

        // The protected versions always come from the candidate set.
        if let Some(rel) = &release {
            prop_assert!(versions.contains_key(rel));
            prop_assert!(rel.pre.is_empty());
        }
        if let Some(pre) = &prerelease {
            prop_assert!(versions.contains_key(pre));
            prop_assert!(!pre.pre.is_empty());
        }
    }

    /// Every unprotected version is strictly older than some protected
    /// one, so deleting it never removes the newest usable content.
    #[test]
    fn test_unprotected_versions_are_superseded(versions in version_set_strategy()) {
        let (release, prerelease) = protected_versions(&versions);
        let newest_protected = release.iter().chain(prerelease.iter()).max();

        for version in versions.keys() {
            if Some(version) == release.as_ref() || Some(version) == prerelease.as_ref() {
                continue;
            }
            let newest = newest_protected.expect("unprotected version implies a protected one");
            prop_assert!(version < newest);
        }
    }
}

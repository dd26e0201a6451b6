//! Integration tests for the package dependency model.
//!
//! Packages are built the way a listing collaborator would build them: from a
//! project manifest on disk plus installed and registry versions.

use bowerkit::metadata::{BOWER_JSON_FILE, BowerJson};
use bowerkit::package::{
    DependencyType, ManifestDependencies, Package, PackageDependency, PackageInfo, PackageStatus,
};
use std::collections::BTreeMap;
use tempfile::TempDir;

/// Helper to load a manifest written to a temp project.
async fn load_manifest(content: &str) -> (TempDir, BowerJson) {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(BOWER_JSON_FILE), content).unwrap();
    let mut manifest = BowerJson::in_dir(temp.path());
    manifest.load().await.expect("Failed to load manifest");
    (temp, manifest)
}

fn installed(name: &str, version: &str) -> Package {
    let mut pkg = Package::new(name);
    pkg.version = Some(version.to_string());
    pkg
}

mod version_tests {
    use super::*;

    #[test]
    fn has_updates_examples() {
        let cases = [
            ("1.2.0", "1.3.0", true),
            ("1.2.0", "1.2.0", false),
            ("2.0.0", "1.9.9", false),
            ("1.9.9", "2.0.0", true),
            ("1.2.0", "1.2", false),
        ];

        for (version, latest, expected) in cases {
            let mut pkg = installed("jquery", version);
            pkg.latest_version = Some(latest.to_string());
            assert_eq!(
                pkg.has_updates(),
                expected,
                "version={} latest={}",
                version,
                latest
            );
        }
    }

    #[test]
    fn version_in_sync_examples() {
        let mut pkg = installed("jquery", "1.2.0");
        assert!(pkg.is_version_in_sync());

        pkg.bower_json_version = Some("^1.0.0".to_string());
        assert!(pkg.is_version_in_sync());

        pkg.bower_json_version = Some("^2.0.0".to_string());
        assert!(!pkg.is_version_in_sync());

        pkg.bower_json_version = Some(">=1.0.0 <1.2.0 || 1.2.x".to_string());
        assert!(pkg.is_version_in_sync());

        pkg.bower_json_version = Some("https://example.com/jquery.zip".to_string());
        assert!(pkg.is_version_in_sync());
    }

    #[test]
    fn registry_info_drives_update_check() {
        let mut pkg = installed("jquery", "1.11.0");
        assert!(!pkg.has_updates());

        let info: PackageInfo =
            serde_json::from_str(r#"{"name": "jquery", "latestVersion": "1.11.3"}"#).unwrap();
        pkg.update_version_info(Some(&info));

        assert_eq!(pkg.latest_version.as_deref(), Some("1.11.3"));
        assert!(pkg.has_updates());
    }
}

mod relationship_tests {
    use super::*;

    #[test]
    fn dependency_map_queries() {
        let mut pkg = Package::new("bootstrap");
        pkg.add_dependency(Some(PackageDependency::new("jquery", Some(">= 1.9.1".into()))));
        pkg.add_dependency(Some(PackageDependency::new("popper", None)));

        assert!(pkg.has_dependencies());
        assert!(pkg.has_dependency("jquery"));
        assert_eq!(pkg.dependencies_count(), 2);

        let mut names = pkg.dependencies_names();
        names.sort();
        assert_eq!(names, vec!["jquery", "popper"]);

        pkg.remove_dependency("jquery");
        pkg.remove_dependency("jquery");
        assert_eq!(pkg.dependencies_count(), 1);
    }

    #[test]
    fn dependants_behave_as_a_set() {
        let mut jquery = Package::new("jquery");
        for name in ["bootstrap", "select2", "bootstrap", "chosen"] {
            jquery.add_dependant(name);
        }
        assert_eq!(jquery.dependants_count(), 3);

        jquery.remove_dependant("select2");
        assert!(!jquery.has_dependant("select2"));
        assert_eq!(jquery.dependants(), &["bootstrap", "chosen"]);

        jquery.remove_dependant("bootstrap");
        jquery.remove_dependant("chosen");
        assert!(!jquery.has_dependants());
    }
}

mod manifest_tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "name": "webapp",
        "dependencies": {"jquery": "~2.1.0", "angular": "1.4.x"},
        "devDependencies": {"jasmine": "^2.3.0"}
    }"#;

    #[tokio::test]
    async fn manifest_membership() {
        let (_temp, manifest) = load_manifest(MANIFEST).await;
        let deps = manifest.dependencies();

        assert!(Package::is_in_bower_json_deps("jquery", Some(&deps)));
        assert!(Package::is_in_bower_json_deps("jasmine", Some(&deps)));
        assert!(!Package::is_in_bower_json_deps("lodash", Some(&deps)));
    }

    #[test]
    fn membership_against_empty_manifest() {
        let only_foo = ManifestDependencies {
            dependencies: Some(BTreeMap::from([("foo".to_string(), "*".to_string())])),
            dev_dependencies: None,
        };
        assert!(Package::is_in_bower_json_deps("foo", Some(&only_foo)));
        assert!(!Package::is_in_bower_json_deps(
            "foo",
            Some(&ManifestDependencies::default())
        ));
    }

    #[tokio::test]
    async fn direct_dependency_classification() {
        let (_temp, manifest) = load_manifest(MANIFEST).await;
        let deps = manifest.dependencies();

        assert!(Package::is_project_direct_dependency(
            "foo",
            PackageStatus::Missing,
            Some(&deps)
        ));
        assert!(Package::is_project_direct_dependency(
            "foo",
            PackageStatus::NotTracked,
            Some(&deps)
        ));
        assert!(Package::is_project_direct_dependency(
            "angular",
            PackageStatus::Installed,
            Some(&deps)
        ));
        assert!(!Package::is_project_direct_dependency(
            "jquery-ui",
            PackageStatus::Installed,
            Some(&deps)
        ));
    }

    #[tokio::test]
    async fn package_built_from_manifest() {
        let (_temp, manifest) = load_manifest(MANIFEST).await;

        let mut angular = installed("angular", "1.4.9");
        angular.bower_json_version = manifest.declared_range("angular").map(String::from);
        angular.latest_version = Some("1.5.0".to_string());
        assert!(angular.is_version_in_sync());
        assert!(angular.has_updates());

        let mut jasmine = installed("jasmine", "3.0.0");
        jasmine.dependency_type = DependencyType::Development;
        jasmine.bower_json_version = manifest.declared_range("jasmine").map(String::from);
        assert!(jasmine.is_dev_dependency());
        assert!(!jasmine.is_version_in_sync());

        let mut other = Package::new("angular");
        other.bower_json_version = Some("1.4.x".to_string());
        assert!(angular.is_equal_to(&other));
        assert!(!jasmine.is_equal_to(&other));
    }
}

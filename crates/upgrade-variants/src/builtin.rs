//! Built-in variant and deprecation tables
//!
//! Every row here changes value exactly once, so rows are written as the
//! release the new value first appears in.

use once_cell::sync::Lazy;

use crate::catalog::{VariantCatalog, VariantRow};
use crate::version::SupportedVersion::{self, V6_2, V6_3, V6_4};

static BUILTIN: Lazy<VariantCatalog> = Lazy::new(build);

/// Process-wide read-only catalogue
pub fn catalog() -> &'static VariantCatalog {
    &BUILTIN
}

fn rows(changes: &[(SupportedVersion, &str, &str)]) -> Vec<VariantRow> {
    changes
        .iter()
        .map(|(pivot, before, after)| VariantRow::changed_at(*pivot, before, after))
        .collect()
}

/// Role names that were renamed when the stock roles became locked in 6.3
const RENAMED_ROLES: &[(SupportedVersion, &str, &str)] = &[
    (V6_3, "viewer", "customized viewer"),
    (V6_3, "site manager", "customized site manager"),
    (V6_3, "manager", "customized manager"),
    (V6_3, "discovery reader", "customized discovery reader"),
    (V6_3, "discovery manager", "customized discovery manager"),
    (V6_3, "compliance viewer", "customized compliance viewer"),
    (V6_3, "compliance manager", "customized compliance manager"),
    (V6_3, "anonymous", "default role"),
];

const CAPSULE: &[(SupportedVersion, &str, &str)] = &[
    (
        V6_4,
        "tftp, dns, dhcp, puppet, puppet ca, bmc, pulp node, templates, discovery, openscap, dynflow, ssh",
        "puppet, puppet ca, pulp node, templates, discovery, tftp, dns, dhcp, bmc, openscap, dynflow, ssh, ansible",
    ),
    (
        V6_4,
        "tftp, dns, dhcp, puppet, puppet ca, bmc, pulp, discovery, openscap, dynflow, ssh",
        "tftp, dns, dhcp, puppet, puppet ca, pulp, discovery, bmc, openscap, dynflow, ssh, ansible",
    ),
];

const FILTER_RESOURCE_TYPES: &[(SupportedVersion, &str, &str)] = &[
    (V6_2, "lookupkey", "variablelookupkey"),
    (V6_2, "(miscellaneous)", "foremanopenscap::arfreport"),
    (V6_2, "organization", "katello::subscription"),
    (V6_2, "configtemplate", "provisioningtemplate"),
    (V6_4, "authsourceldap", "authsource"),
    (V6_4, "templateinvocation", "(miscellaneous)"),
    (V6_4, "docker/imagesearch", "(miscellaneous)"),
];

const FILTER_PERMISSIONS: &[(SupportedVersion, &str, &str)] = &[
    (
        V6_2,
        "view_templates, create_templates, edit_templates, destroy_templates, deploy_templates",
        "view_provisioning_templates, create_provisioning_templates, edit_provisioning_templates, \
         destroy_provisioning_templates, deploy_provisioning_templates",
    ),
];

const FILTER_LATE_PERMISSIONS: &[(SupportedVersion, &str, &str)] = &[
    (V6_3, "commonparameter", "parameter"),
    (V6_4, "execute_template_invocation", ""),
    (
        V6_4,
        "create_job_invocations, view_job_invocations",
        "create_job_invocations, view_job_invocations, cancel_job_invocations",
    ),
    (
        V6_4,
        "execute_template_invocation, filter_autocompletion_for_template_invocation",
        "filter_autocompletion_for_template_invocation, create_template_invocations",
    ),
    (
        V6_4,
        "view_hostgroups, create_hostgroups, edit_hostgroups, destroy_hostgroups",
        "view_hostgroups, create_hostgroups, edit_hostgroups, destroy_hostgroups, play_roles_on_hostgroup",
    ),
    (
        V6_4,
        "view_registries, create_registries, destroy_registries",
        "view_registries, create_registries, destroy_registries, search_repository_image_search",
    ),
    (V6_4, "search_repository_image_search", ""),
    (
        V6_4,
        "view_gpg_keys, create_gpg_keys, edit_gpg_keys, destroy_gpg_keys",
        "view_gpg_keys, create_gpg_keys, edit_gpg_keys, destroy_gpg_keys, view_content_credentials, \
         create_content_credentials, edit_content_credentials, destroy_content_credentials",
    ),
    (
        V6_4,
        "view_subscriptions, attach_subscriptions, unattach_subscriptions, import_manifest, delete_manifest",
        "view_subscriptions, attach_subscriptions, unattach_subscriptions, import_manifest, delete_manifest, \
         manage_subscription_allocations",
    ),
    (
        V6_4,
        "execute_template_invocation, filter_autocompletion_for_template_invocation",
        "filter_autocompletion_for_template_invocation, create_template_invocations, view_template_invocations",
    ),
    (V6_4, "view_gpg_keys", "view_gpg_keys, view_content_credentials"),
    (
        V6_4,
        "view_hosts, create_hosts, build_hosts, view_discovered_hosts, provision_discovered_hosts, \
         edit_discovered_hosts, destroy_discovered_hosts, submit_discovered_hosts, auto_provision_discovered_hosts",
        "view_hosts, create_hosts, edit_hosts, build_hosts, view_discovered_hosts, provision_discovered_hosts, \
         edit_discovered_hosts, destroy_discovered_hosts, submit_discovered_hosts, auto_provision_discovered_hosts",
    ),
    (
        V6_4,
        "view_hosts, create_hosts, edit_hosts, destroy_hosts, build_hosts, power_hosts, console_hosts, \
         puppetrun_hosts, ipmi_boot_hosts, view_discovered_hosts, provision_discovered_hosts, \
         edit_discovered_hosts, destroy_discovered_hosts, submit_discovered_hosts, auto_provision_discovered_hosts",
        "view_hosts, create_hosts, edit_hosts, destroy_hosts, build_hosts, power_hosts, console_hosts, \
         puppetrun_hosts, ipmi_boot_hosts, view_discovered_hosts, provision_discovered_hosts, \
         edit_discovered_hosts, destroy_discovered_hosts, submit_discovered_hosts, auto_provision_discovered_hosts, \
         play_roles_on_host",
    ),
];

const SETTINGS_VALUES: &[(SupportedVersion, &str, &str)] = &[
    (V6_3, "immediate", "on_demand"),
    (V6_3, "", "/etc/pki/katello/certs/katello-apache.crt"),
    (V6_3, "", "/etc/pki/katello/private/katello-apache.key"),
    (V6_3, "false", "true"),
    (
        V6_3,
        r#"["lo", "usb*", "vnet*", "macvtap*"]"#,
        r#"["lo", "usb*", "vnet*", "macvtap*", "_vdsmdummy_", "veth*", "docker*", "tap*", "qbr*", "qvb*", "qvo*", "qr-*", "qg-*", "vlinuxbr*", "vovsbr*"]"#,
    ),
];

const SETTINGS_DESCRIPTIONS: &[(SupportedVersion, &str, &str)] = &[
    (
        V6_3,
        "fact name to use for primary interface detection and hostname",
        "fact name to use for primary interface detection",
    ),
    (
        V6_3,
        "automatically reboot discovered host during provisioning",
        "automatically reboot or kexec discovered host during provisioning",
    ),
    (
        V6_3,
        "default provisioning template for new atomic operating systems",
        "default provisioning template for new atomic operating systems created from synced content",
    ),
    (
        V6_3,
        "default finish template for new operating systems",
        "default finish template for new operating systems created from synced content",
    ),
    (
        V6_3,
        "default ipxe template for new operating systems",
        "default ipxe template for new operating systems created from synced content",
    ),
    (
        V6_3,
        "default kexec template for new operating systems",
        "default kexec template for new operating systems created from synced content",
    ),
    (
        V6_3,
        "default provisioning template for new operating systems",
        "default provisioning template for operating systems created from synced content",
    ),
    (
        V6_3,
        "default partitioning table for new operating systems",
        "default partitioning table for new operating systems created from synced content",
    ),
    (
        V6_3,
        "default pxelinux template for new operating systems",
        "default pxelinux template for new operating systems created from synced content",
    ),
    (
        V6_3,
        "default user data for new operating systems",
        "default user data for new operating systems created from synced content",
    ),
    (
        V6_3,
        "when unregistering host via subscription-manager, also delete server-side host record",
        "when unregistering a host via subscription-manager, also delete the host record. managed resources \
         linked to host such as virtual machines and dns records may also be deleted.",
    ),
    (
        V6_3,
        "private key that foreman will use to encrypt websockets",
        "private key file that foreman will use to encrypt websockets",
    ),
    (
        V6_4,
        "duration in minutes after the puppet interval for servers to be classed as out of sync.",
        "duration in minutes after servers are classed as out of sync.",
    ),
    (V6_4, "satellite kickstart default user data", "kickstart default user data"),
    (V6_4, "satellite kickstart default", "kickstart default"),
    (V6_4, "satellite kickstart default finish", "kickstart default finish"),
    (V6_4, "satellite atomic kickstart default", "atomic kickstart default"),
    (V6_4, "default_location", "default location"),
    (
        V6_4,
        r#"what command should be used to switch to the effective user. one of ["sudo", "su"]"#,
        r#"what command should be used to switch to the effective user. one of ["sudo", "dzdo", "su"]"#,
    ),
];

const TEMPLATE_NAMES: &[(SupportedVersion, &str, &str)] = &[
    (V6_4, "idm_register", "deprecated idm_register"),
    (
        V6_4,
        "satellite atomic kickstart default",
        "deprecated satellite atomic kickstart default",
    ),
    (V6_4, "satellite kickstart default", "deprecated satellite kickstart default"),
    (
        V6_4,
        "satellite kickstart default finish",
        "deprecated satellite kickstart default finish",
    ),
    (
        V6_4,
        "satellite kickstart default user data",
        "deprecated satellite kickstart default user data",
    ),
];

/// Settings removed from the product in 6.4
const SETTINGS_REMOVED_6_4: &[&str] = &[
    "use_pulp_oauth",
    "use_gravatar",
    "trusted_puppetmaster_hosts",
    "force_post_sync_actions",
];

fn build() -> VariantCatalog {
    let mut catalog = VariantCatalog::new()
        .with_rows("capsule", rows(CAPSULE))
        .with_rows("compute-resource", rows(&[(V6_3, "rhev", "rhv")]))
        .with_rows("filter", rows(FILTER_RESOURCE_TYPES))
        .with_rows("filter", rows(FILTER_PERMISSIONS))
        .with_rows("filter", rows(RENAMED_ROLES))
        .with_rows("filter", rows(FILTER_LATE_PERMISSIONS))
        .with_rows(
            "organization",
            rows(&[(V6_4, "default_organization", "default organization")]),
        )
        .with_rows("role", rows(RENAMED_ROLES))
        .with_rows("settings", rows(SETTINGS_VALUES))
        .with_rows("settings", rows(SETTINGS_DESCRIPTIONS))
        .with_rows("subscription", rows(&[(V6_3, "-1", "unlimited")]))
        .with_rows("template", rows(TEMPLATE_NAMES));

    catalog.deprecate(SupportedVersion::V6_4, "settings", SETTINGS_REMOVED_6_4.iter().copied());
    tracing::debug!("built-in variant catalog initialised");
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::UpgradePath;
    use SupportedVersion::*;

    #[test]
    fn test_row_counts() {
        let catalog = catalog();
        assert_eq!(catalog.rows("capsule").len(), 2);
        assert_eq!(catalog.rows("compute-resource").len(), 1);
        assert_eq!(catalog.rows("filter").len(), 29);
        assert_eq!(catalog.rows("organization").len(), 1);
        assert_eq!(catalog.rows("role").len(), 8);
        assert_eq!(catalog.rows("settings").len(), 24);
        assert_eq!(catalog.rows("subscription").len(), 1);
        assert_eq!(catalog.rows("template").len(), 5);
        assert_eq!(catalog.components().count(), 8);
    }

    #[test]
    fn test_filter_row_order() {
        let filter = catalog().rows("filter");
        assert_eq!(filter[0].value_at(V6_1), "lookupkey");
        assert_eq!(filter[0].value_at(V6_2), "variablelookupkey");
        assert_eq!(filter[8].value_at(V6_2), "viewer");
        assert_eq!(filter[8].value_at(V6_3), "customized viewer");
        assert_eq!(filter[16].values(), &["commonparameter", "commonparameter", "parameter", "parameter", "parameter"]);
        assert_eq!(filter[17].value_at(V6_4), "");
    }

    #[test]
    fn test_long_values_are_joined_without_gaps() {
        let path = UpgradePath::new(V6_1, V6_2);
        let expected = catalog().expected_post_values(
            "filter",
            "view_templates, create_templates, edit_templates, destroy_templates, deploy_templates",
            path,
        );
        assert_eq!(
            expected,
            vec![
                "view_provisioning_templates, create_provisioning_templates, edit_provisioning_templates, \
                 destroy_provisioning_templates, deploy_provisioning_templates"
                    .to_string()
            ]
        );
        assert!(!expected[0].contains("  "));
    }

    #[test]
    fn test_duplicate_pre_values_keep_both_rows() {
        let path = UpgradePath::new(V6_3, V6_4);
        let expected = catalog().expected_post_values(
            "filter",
            "execute_template_invocation, filter_autocompletion_for_template_invocation",
            path,
        );
        assert_eq!(expected.len(), 2);
    }

    #[test]
    fn test_settings_deprecations() {
        let removed = catalog().deprecated_for(V6_4, "settings");
        assert_eq!(removed.len(), 4);
        assert!(removed.contains(&"use_pulp_oauth".to_string()));
        assert!(catalog().deprecated_for(V6_5, "settings").is_empty());
    }
}

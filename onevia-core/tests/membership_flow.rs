use onevia_core::constants::STORAGE_KEY;
use onevia_core::{
    AddonKey, Catalog, Cents, ClientStorage, Membership, MembershipSession, MemoryStorage, PlanKey,
    Price, SiteConfig, Total, Variant,
};

fn open(variant: Variant, storage: MemoryStorage) -> MembershipSession<MemoryStorage> {
    MembershipSession::open(
        SiteConfig::for_variant(variant),
        Catalog::bundled(variant).expect("bundled catalog"),
        storage,
    )
}

fn defaults(variant: Variant) -> Membership {
    Membership::defaults(&Catalog::bundled(variant).unwrap(), PlanKey::Individual)
}

#[test]
fn empty_storage_loads_defaults_exactly() {
    for variant in Variant::ALL {
        let session = open(variant, MemoryStorage::new());
        assert_eq!(session.membership(), &defaults(variant), "{variant:?}");
    }
}

#[test]
fn malformed_json_loads_defaults_exactly() {
    for raw in ["{not json", "", "[1,", "undefined"] {
        let storage = MemoryStorage::new().with_item(STORAGE_KEY, raw);
        let session = open(Variant::FamilyDiscount, storage);
        assert_eq!(
            session.membership(),
            &defaults(Variant::FamilyDiscount),
            "input {raw:?}"
        );
    }
}

#[test]
fn family_plan_with_pharmacy_totals_375() {
    let mut session = open(Variant::FamilyDiscount, MemoryStorage::new());
    session.choose_catalog_plan(PlanKey::Family);
    session.set_addon("rx", true).unwrap();

    let summary = session.summary();
    assert_eq!(summary.total, Total::Amount(Cents::from_whole_dollars(375)));
    assert_eq!(session.total_text(), "$375 / month");

    let lines: Vec<(String, String)> = summary
        .lines
        .iter()
        .map(|l| (l.label.clone(), l.price_text(session.price_format())))
        .collect();
    assert_eq!(
        lines,
        vec![
            (
                "Family membership (2 adults + 2 kids)".to_string(),
                "$300".to_string()
            ),
            ("Pharmacy".to_string(), "$75".to_string()),
        ]
    );
}

#[test]
fn family_plan_from_radio_attributes_totals_375() {
    let mut session = open(Variant::FamilyDiscount, MemoryStorage::new());
    session
        .choose_plan("family", Some("Family membership"), Some("300"))
        .unwrap();
    session.set_addon("rx", true).unwrap();
    assert_eq!(session.total_text(), "$375 / month");
}

#[test]
fn toggling_addon_restores_contribution() {
    let mut session = open(Variant::FamilyDiscount, MemoryStorage::new());
    session.set_addon("dental", true).unwrap();
    let with_dental = session.summary().total;

    session.set_addon("dental", false).unwrap();
    assert_eq!(
        session.summary().total,
        Total::Amount(Cents::from_whole_dollars(100))
    );

    session.set_addon("dental", true).unwrap();
    assert_eq!(session.summary().total, with_dental);
    assert_eq!(with_dental, Total::Amount(Cents::from_whole_dollars(140)));
}

#[test]
fn contact_priced_plan_forces_cta() {
    let mut session = open(Variant::ContactPricing, MemoryStorage::new());
    session.set_addon("vision", true).unwrap();
    assert_eq!(session.total_text(), "$110 / month");

    session.choose_catalog_plan(PlanKey::Family);
    assert_eq!(session.summary().total, Total::ContactForPricing);
    assert_eq!(session.total_text(), "Call for pricing");

    let plan_line = &session.summary().lines[0];
    assert_eq!(plan_line.price, Price::Contact);
    assert_eq!(plan_line.price_text(session.price_format()), "Contact us");
}

#[test]
fn contact_priced_addon_forces_cta() {
    let mut catalog_json: serde_json::Value = serde_json::from_str(include_str!(
        "../static/catalog/contact_pricing.json"
    ))
    .unwrap();
    catalog_json["addons"]["dental"]["price"] = "contact".into();
    let catalog = Catalog::from_json(&catalog_json.to_string()).unwrap();

    let mut session = MembershipSession::open(
        SiteConfig::for_variant(Variant::ContactPricing),
        catalog,
        MemoryStorage::new(),
    );
    session.set_addon("rx", true).unwrap();
    assert_eq!(session.total_text(), "$125 / month");
    session.set_addon("dental", true).unwrap();
    assert_eq!(session.total_text(), "Call for pricing");
    session.set_addon("dental", false).unwrap();
    assert_eq!(session.total_text(), "$125 / month");
}

#[test]
fn basic_variant_ignores_family_multiplier_and_renders_raw() {
    let mut session = open(Variant::Basic, MemoryStorage::new());
    session
        .choose_plan("family", Some("Family membership"), Some("299.5"))
        .unwrap();
    session.set_addon("rx", true).unwrap();
    assert_eq!(session.total_text(), "$324.5 / month");
}

#[test]
fn changes_survive_reload() {
    let mut first = open(Variant::FamilyDiscount, MemoryStorage::new());
    first.choose_catalog_plan(PlanKey::Family);
    first.set_addon("vision", true).unwrap();
    let stored = first
        .storage()
        .get(STORAGE_KEY)
        .unwrap()
        .expect("selection persisted");

    let storage = MemoryStorage::new().with_item(STORAGE_KEY, &stored);
    let second = open(Variant::FamilyDiscount, storage);
    assert_eq!(second.membership(), first.membership());
    assert!(second.membership().is_selected(AddonKey::Vision));
    assert_eq!(second.total_text(), "$330 / month");
}

#[test]
fn unknown_addon_change_is_rejected_without_side_effects() {
    let mut session = open(Variant::FamilyDiscount, MemoryStorage::new());
    assert!(session.set_addon("massage", true).is_err());
    assert!(session.storage().get(STORAGE_KEY).unwrap().is_none());
}

use rfp_spec::{
    AnswerRecord, Branding, FieldKey, RULES, StepId, WizardSession, build_sections, can_advance,
    compute_visibility, export_ready, step_reports,
};

fn fixture() -> AnswerRecord {
    AnswerRecord::from_json_str(include_str!("fixtures/scenario_a.json")).expect("fixture")
}

#[test]
fn first_step_unblocks_exactly_when_last_static_field_is_filled() {
    let mut session = WizardSession::new();
    let answers = [
        (FieldKey::ReturnsPerYear, "42000"),
        (FieldKey::SellsIntoRetailers, "No"),
        (FieldKey::ReturnsHandling, "Resell on our site"),
        (FieldKey::Countries, "US"),
        (FieldKey::WarrantyProgram, "Yes"),
        (FieldKey::SubscriptionProgram, "Yes"),
    ];

    for (index, (key, value)) in answers.iter().enumerate() {
        assert!(!session.can_advance(), "advanced before {key} was answered");
        session.update_field(*key, *value);
        if index + 1 < answers.len() {
            assert!(!session.can_advance());
        }
    }
    assert!(session.can_advance());

    // Answers on later steps do not affect the first one.
    session.update_field(FieldKey::BrandedDtc, "Yes");
    session.update_field(FieldKey::ExcessInventoryChannel, "Off-Priced Retailers (National)");
    assert!(session.can_advance());
}

#[test]
fn revealed_conditional_field_blocks_until_answered() {
    let mut session = WizardSession::with_record(fixture());
    assert!(session.can_advance());

    session.update_field(FieldKey::SubscriptionProgram, "No");
    assert!(!session.can_advance());
    assert_eq!(session.missing_required(), vec![FieldKey::SubscriptionInterest]);

    session.update_field(FieldKey::SubscriptionInterest, "No");
    assert!(session.can_advance());
}

#[test]
fn free_navigation_ignores_completion() {
    let mut session = WizardSession::new();
    session.go_to_step(StepId::Lead.index());
    assert_eq!(session.current_step(), StepId::Lead);
    assert!(session.can_advance());
    assert!(!session.export_ready());
    session.go_next();
    assert_eq!(session.current_step(), StepId::Lead);
}

#[test]
fn reset_restores_defaults_and_first_step() {
    let mut session = WizardSession::with_record(fixture());
    session.go_to_step(2);
    session.toggle_channel("Other");
    session.update_field(FieldKey::SalesSplitDtc, 12u32);

    session.reset();

    assert_eq!(session.record(), &AnswerRecord::default());
    assert_eq!(session.step_index(), 0);
}

#[test]
fn contact_fields_gate_export_only() {
    let mut record = fixture();
    record.name = String::new();
    record.email = "x@y.com".into();
    assert!(!export_ready(&record));

    let visibility = compute_visibility(&record);
    assert!(can_advance(StepId::Lead, &record, &visibility));
}

#[test]
fn intake_and_document_agree_on_conditional_rows() {
    let labels = [
        (FieldKey::RetailerProgram, 2, "Retailer program"),
        (FieldKey::WarrantyInterest, 2, "Warranty program interest"),
        (FieldKey::SubscriptionInterest, 2, "Subscription program interest"),
        (FieldKey::BrandedManagement, 3, "Management approach"),
        (FieldKey::ExcessInventoryNational, 4, "National retailers"),
        (FieldKey::ExcessInventoryRegional, 4, "Regional retailers"),
    ];
    assert_eq!(labels.len(), RULES.len());

    let mut record = fixture();
    for flip in [false, true] {
        if flip {
            record.sells_into_retailers = "No".into();
            record.warranty_program = "Yes".into();
            record.subscription_program = "No".into();
            record.branded_dtc = "No".into();
            record.excess_inventory_channel = "Off-Priced Retailers (National)".into();
        }
        let visibility = compute_visibility(&record);
        let sections = build_sections(&record, &Branding::default());
        for (key, section, label) in labels {
            let shown = sections[section - 1].row(label).is_some();
            assert_eq!(shown, visibility[&key], "{key} disagrees");
        }
    }
}

#[test]
fn step_reports_cover_every_step() {
    let reports = step_reports(&AnswerRecord::default());
    assert_eq!(reports.len(), 4);
    assert!(!reports[0].can_advance);
    assert!(reports[3].can_advance);
    assert!(reports[1].missing.contains(&FieldKey::BrandedDtc));

    assert!(step_reports(&fixture()).iter().all(|report| report.can_advance));
}

use chrono::NaiveDate;
use pagecast_core::{
    Ad, AdFormat, AdSet, AudienceMode, CallToAction, Campaign, CampaignDraft, CampaignRecord,
    CampaignStatus, CharCounter, CustomTargeting, Objective,
};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
}

#[test]
fn ad_set_keeps_only_saved_audience_in_saved_mode() {
    let ad_set = AdSet::new(
        "Summer",
        AudienceMode::Saved,
        12.0,
        start(),
        None,
        Some("aud_1".to_string()),
        Some(CustomTargeting::default()),
    );

    assert_eq!(ad_set.saved_audience_id().as_deref(), Some("aud_1"));
    assert!(ad_set.targeting().is_none());
}

#[test]
fn ad_set_drops_audience_data_in_auto_mode() {
    let ad_set = AdSet::new(
        "Summer",
        AudienceMode::Auto,
        12.0,
        start(),
        None,
        Some("aud_1".to_string()),
        Some(CustomTargeting::default()),
    );

    assert!(ad_set.saved_audience_id().is_none());
    assert!(ad_set.targeting().is_none());
}

#[test]
fn draft_is_complete_once_all_steps_recorded() {
    let mut draft = CampaignDraft::default();
    assert!(!draft.is_complete());

    draft.campaign = Some(Campaign::new("Launch", Objective::Traffic, 100.0));
    draft.ad_set = Some(AdSet::new(
        "Launch set",
        AudienceMode::Auto,
        20.0,
        start(),
        None,
        None,
        None,
    ));
    draft.ad = Some(Ad::new(
        "Launch ad",
        AdFormat::SingleImage,
        "page_1",
        "New opening hours",
        "Now open on Sundays",
        "Visit us",
        None,
        CallToAction::LearnMore,
    ));

    assert!(draft.is_complete());
    let estimate = draft.estimate();
    assert_eq!(*estimate.reach(), 1000);
    assert_eq!(*estimate.clicks(), 40);
}

#[test]
fn draft_serializes_call_to_action_in_upper_case() {
    let ad = Ad::new(
        "a",
        AdFormat::Video,
        "page_1",
        "h",
        "b",
        "d",
        Some("https://example.com".to_string()),
        CallToAction::ShopNow,
    );
    let json = serde_json::to_value(&ad).unwrap();
    assert_eq!(json["callToAction"], "SHOP_NOW");
    assert_eq!(json["format"], "video");
}

#[test]
fn char_counter_counts_characters_not_bytes() {
    let counter = CharCounter::new("Crème brûlée", Ad::DESCRIPTION_MAX);
    assert_eq!(counter.len(), 12);
    assert!(!counter.over_limit());

    let long = "x".repeat(Ad::HEADLINE_MAX + 1);
    assert!(CharCounter::new(&long, Ad::HEADLINE_MAX).over_limit());
}

#[test]
fn campaign_record_parses_listing() {
    let json = r#"{"id":"c1","name":"Launch","objective":"TRAFFIC","status":"ACTIVE",
        "budget":200.0,"spent":50.0,"clicks":25,"created_time":"2025-06-15T10:00:00+0000"}"#;
    let record: CampaignRecord = serde_json::from_str(json).unwrap();

    assert_eq!(*record.status(), CampaignStatus::Active);
    assert_eq!(record.status().toggled(), CampaignStatus::Paused);
    assert_eq!(record.spend_ratio(), 0.25);
    assert_eq!(record.cost_per_click(), 2.0);
    assert!(record.created_time().is_some());
}

use std::sync::Arc;
use std::time::Duration;

use pricebeacon::application::{
    CycleOutcome, IntervalScheduler, PollLoop, WatchSettings,
};
use pricebeacon::domain::{DecisionPolicy, Indicator, MessageTemplate};
use pricebeacon::testkit::fixture::{self, PRIMARY};
use pricebeacon::testkit::publisher::RecordingPublisher;
use pricebeacon::testkit::renderer::{PageScript, ScriptedRenderer};
use rust_decimal_macros::dec;

fn page(text: &str) -> PageScript {
    PageScript::new().with_text(PRIMARY, text)
}

#[tokio::test]
async fn unchanged_then_moved_price_publishes_twice() {
    let renderer = Arc::new(
        ScriptedRenderer::new(page("$0.06000"))
            .then_page(page("$0.05000"))
            .then_page(page("$0.05000")),
    );
    let publisher = Arc::new(RecordingPublisher::new());
    let context = fixture::context(renderer, publisher.clone());

    let outcomes = vec![
        context.run_cycle_at(fixture::at(0)).await,
        context.run_cycle_at(fixture::at(10)).await,
        context.run_cycle_at(fixture::at(20)).await,
    ];

    let published: Vec<bool> = outcomes.iter().map(CycleOutcome::is_published).collect();
    assert_eq!(published, vec![true, false, true]);

    let CycleOutcome::Published { decision, .. } = &outcomes[2] else {
        unreachable!();
    };
    assert_eq!(decision.price_indicator, Indicator::Up);
    assert_eq!(decision.mcap_indicator, Indicator::Up);

    assert_eq!(
        publisher.texts(),
        vec![
            "🟩FPIBANK = 0.05000$\n🟩MCap = $50.00M\n@price_FPIBANK".to_string(),
            "🟩FPIBANK = 0.06000$\n🟩MCap = $60.00M\n@price_FPIBANK".to_string(),
        ]
    );
}

#[tokio::test]
async fn sub_precision_change_is_debounced() {
    let renderer = Arc::new(
        ScriptedRenderer::new(page("$0.123459")).then_page(page("$0.12345")),
    );
    let publisher = Arc::new(RecordingPublisher::new());
    let context = fixture::context(renderer, publisher.clone());

    assert!(context.run_cycle_at(fixture::at(0)).await.is_published());
    assert!(matches!(
        context.run_cycle_at(fixture::at(30)).await,
        CycleOutcome::Suppressed { price } if price == dec!(0.123459)
    ));

    let state = context.decider_state().await;
    assert_eq!(state.last_price, Some(dec!(0.123459)));
    assert_eq!(state.last_sent_price, Some(dec!(0.12345)));
}

#[tokio::test]
async fn heartbeat_republishes_unchanged_price() {
    let renderer = Arc::new(ScriptedRenderer::showing(PRIMARY, "$0.05"));
    let publisher = Arc::new(RecordingPublisher::new());
    let context = fixture::context(renderer, publisher.clone());

    assert!(context.run_cycle_at(fixture::at(0)).await.is_published());
    assert!(!context.run_cycle_at(fixture::at(59)).await.is_published());
    assert!(context.run_cycle_at(fixture::at(60)).await.is_published());
    assert!(!context.run_cycle_at(fixture::at(61)).await.is_published());

    let texts = publisher.texts();
    assert_eq!(texts.len(), 2);
    assert!(texts[1].starts_with("FPIBANK = 0.05000$\nMCap"));
}

#[tokio::test]
async fn rollback_retries_unsent_change() {
    let renderer = Arc::new(
        ScriptedRenderer::new(page("$0.06"))
            .then_page(page("$0.05"))
            .then_page(page("$0.06")),
    );
    let publisher = Arc::new(RecordingPublisher::new());
    let context = fixture::context(renderer, publisher.clone());

    assert!(context.run_cycle_at(fixture::at(0)).await.is_published());
    publisher.fail_next(1);
    assert!(matches!(
        context.run_cycle_at(fixture::at(10)).await,
        CycleOutcome::PublishFailed { .. }
    ));
    let retried = context.run_cycle_at(fixture::at(20)).await;

    let CycleOutcome::Published { decision, message, .. } = retried else {
        panic!("unsent change should be retried");
    };
    // The indicator follows raw observations, not the failed send.
    assert_eq!(decision.price_indicator, Indicator::None);
    assert!(message.text.contains("0.06000$"));
    assert_eq!(publisher.attempts(), 3);
    assert_eq!(publisher.sent().len(), 2);
}

#[tokio::test]
async fn custom_template_and_precision() {
    let renderer = Arc::new(ScriptedRenderer::showing(PRIMARY, "$0.987654"));
    let publisher = Arc::new(RecordingPublisher::new());
    let settings = WatchSettings {
        policy: DecisionPolicy {
            decimal_places: 2,
            ..DecisionPolicy::default()
        },
        template: MessageTemplate {
            symbol: "ABC".into(),
            currency_suffix: " USD".into(),
            channel_tag: "@abc".into(),
            show_price_indicator: true,
            show_mcap_indicator: false,
        },
        total_supply: 2_000_000_000,
        rollback_on_publish_failure: true,
    };
    let context = fixture::context_with(renderer, publisher.clone(), settings);

    context.run_cycle_at(fixture::at(0)).await;

    assert_eq!(
        publisher.texts(),
        vec!["🟩ABC = 0.98 USD\nMCap = $1.98B\n@abc".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn poll_loop_runs_cycle_per_tick() {
    let renderer = Arc::new(ScriptedRenderer::showing(PRIMARY, "$0.05"));
    let stats = renderer.stats();
    let publisher = Arc::new(RecordingPublisher::new());
    let context = Arc::new(fixture::context(renderer, publisher.clone()));

    let poll = PollLoop::new(
        context,
        IntervalScheduler::new(Duration::from_secs(10), 2),
    );
    let report = poll.run(tokio::time::sleep(Duration::from_secs(25))).await;

    assert_eq!(report.started, 3);
    assert_eq!(report.skipped, 0);
    assert_eq!(stats.loads(), 3);
    assert_eq!(stats.releases(), 3);
    assert_eq!(publisher.sent().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn slow_cycles_are_bounded() {
    let renderer = Arc::new(
        ScriptedRenderer::showing(PRIMARY, "$0.05").with_load_delay(Duration::from_secs(25)),
    );
    let stats = renderer.stats();
    let publisher = Arc::new(RecordingPublisher::new());
    let context = Arc::new(fixture::context(renderer, publisher.clone()));

    let poll = PollLoop::new(
        context,
        IntervalScheduler::new(Duration::from_secs(10), 1),
    );
    let report = poll.run(tokio::time::sleep(Duration::from_secs(35))).await;

    assert_eq!(report.started, 2);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.panicked, 0);
    assert_eq!(stats.loads(), 2);
    assert_eq!(stats.releases(), 2);
}

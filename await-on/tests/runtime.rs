use await_on::{Element, Error, Input, Outcome, Payload, normalize};
use tokio::sync::oneshot;

fn deferred_from(rx: oneshot::Receiver<Result<&'static str, Error>>) -> Element<'static, &'static str> {
    Element::deferred(async move {
        match rx.await {
            Ok(ret) => ret,
            Err(err) => Err(Error::new(err)),
        }
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sequence_order_with_spawned_producers() {
    let (hello_tx, hello_rx) = oneshot::channel();
    let (world_tx, world_rx) = oneshot::channel();

    let input = Input::sequence([
        deferred_from(hello_rx),
        Element::thunk(move || {
            tokio::spawn(async move {
                let _ = world_tx.send(Ok("world"));
            });
            Ok::<_, Error>("spawned")
        }),
        deferred_from(world_rx),
    ]);

    let normalized = tokio::spawn(normalize(input));

    tokio::task::yield_now().await;
    let _ = hello_tx.send(Ok("hello"));

    let outcome = normalized.await.expect("normalize task");
    assert_eq!(
        outcome.payload(),
        Some(&Payload::Many(vec!["hello", "spawned", "world"]))
    );
}

#[tokio::test]
async fn test_sequence_reports_first_failure() {
    let (fail_tx, fail_rx) = oneshot::channel();
    let (_ok_tx, ok_rx) = oneshot::channel();

    let input = Input::sequence([deferred_from(ok_rx), deferred_from(fail_rx)]);

    tokio::spawn(async move {
        let _ = fail_tx.send(Err(Error::msg("Some error").context("source", "producer")));
    });

    let (payload, error) = normalize(input).await.into_parts();
    assert!(payload.is_none());

    let error = error.expect("error slot");
    assert_eq!(error.to_string(), "Some error [source: producer]");
    assert_eq!(error.context_value("source"), Some("producer"));
}

#[tokio::test]
async fn test_dropped_producer_is_a_failure() {
    let (tx, rx) = oneshot::channel();
    drop(tx);

    let outcome: Outcome<_, _> = normalize(Input::from(deferred_from(rx))).await;
    assert!(outcome.is_failure());
    assert!(
        outcome
            .error()
            .is_some_and(|err| err.is::<oneshot::error::RecvError>())
    );
}

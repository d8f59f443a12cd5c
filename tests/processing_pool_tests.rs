use userstore::{ProcessingPool, StoreError};

#[tokio::test]
async fn every_submitted_job_eventually_completes() {
    let pool = ProcessingPool::spawn(2, 16);

    let mut tickets = Vec::new();
    for i in 0..8 {
        let ticket = pool
            .submit(format!("user-{i}"))
            .await
            .expect("submission failed");
        tickets.push(ticket);
    }

    for ticket in tickets {
        ticket.wait().await.expect("job did not complete cleanly");
    }

    pool.shutdown().await;
}

#[tokio::test]
async fn shutdown_drains_in_flight_jobs() {
    let pool = ProcessingPool::spawn(1, 16);

    let mut tickets = Vec::new();
    for i in 0..4 {
        tickets.push(pool.submit(format!("user-{i}")).await.expect("submission failed"));
    }

    // Close the queue before observing completions; drained jobs must
    // still report back.
    pool.shutdown().await;

    for ticket in tickets {
        ticket.wait().await.expect("drained job lost its completion");
    }
}

#[tokio::test]
async fn dropped_ticket_does_not_stall_the_pool() {
    let pool = ProcessingPool::spawn(2, 4);

    drop(pool.submit("ignored").await.expect("submission failed"));

    let ticket = pool.submit("observed").await.expect("submission failed");
    ticket.wait().await.expect("job did not complete cleanly");

    pool.shutdown().await;
}

#[tokio::test]
async fn zero_concurrency_is_floored_to_one() {
    let pool = ProcessingPool::spawn(0, 0);

    let ticket = pool.submit("solo").await.expect("submission failed");
    assert!(matches!(ticket.wait().await, Ok(())));

    pool.shutdown().await;
}

#[tokio::test]
async fn completions_carry_no_cross_job_ordering() {
    let pool = ProcessingPool::spawn(4, 16);

    let mut tickets = Vec::new();
    for i in 0..6 {
        tickets.push(pool.submit(format!("user-{i}")).await.expect("submission failed"));
    }

    // Await in reverse submission order; each ticket resolves
    // independently of the others.
    for ticket in tickets.into_iter().rev() {
        assert!(matches!(ticket.wait().await, Ok::<(), StoreError>(())));
    }

    pool.shutdown().await;
}

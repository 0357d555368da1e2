use std::time::Duration;

use async_trait::async_trait;
use store_core::{agent, Agent, Mailbox, Post};
use tokio::time::sleep;

/// A minimal agent for exercising the transport end to end: it doubles each
/// request and posts the result back to the requester's mailbox.
struct Doubler {
    requests: Mailbox<(usize, u64)>,
    replies: Post<u64>,
    remaining: usize,
}

#[async_trait]
impl Agent for Doubler {
    fn label(&self) -> String {
        format!("doubler-{}", self.requests.tag())
    }

    async fn run(mut self) {
        while self.remaining > 0 {
            match self.requests.poll() {
                Some((reply_to, value)) => {
                    self.replies.send(reply_to, value * 2).unwrap();
                    self.remaining -= 1;
                }
                None => sleep(Duration::from_millis(2)).await,
            }
        }
    }
}

async fn poll_until<M>(mailbox: &mut Mailbox<M>) -> M {
    loop {
        if let Some(message) = mailbox.poll() {
            return message;
        }
        sleep(Duration::from_millis(2)).await;
    }
}

#[tokio::test]
async fn agents_exchange_addressed_messages() {
    let (requests, request_boxes) = Post::new(2);
    let (replies, mut reply_boxes) = Post::new(2);

    let mut handles = Vec::new();
    for inbox in request_boxes {
        handles.push(agent::spawn(Doubler {
            requests: inbox,
            replies: replies.clone(),
            remaining: 2,
        }));
    }

    // Two requesters address both doublers; replies land in each
    // requester's own mailbox regardless of which doubler served them.
    requests.send(0, (0, 10)).unwrap();
    requests.send(1, (0, 11)).unwrap();
    requests.send(0, (1, 20)).unwrap();
    requests.send(1, (1, 21)).unwrap();

    let mut first = vec![poll_until(&mut reply_boxes[0]).await];
    first.push(poll_until(&mut reply_boxes[0]).await);
    first.sort_unstable();
    assert_eq!(first, vec![20, 22]);

    let mut second = vec![poll_until(&mut reply_boxes[1]).await];
    second.push(poll_until(&mut reply_boxes[1]).await);
    second.sort_unstable();
    assert_eq!(second, vec![40, 42]);

    for handle in handles {
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("doubler should stop on its own")
            .expect("doubler task should not panic");
    }
}

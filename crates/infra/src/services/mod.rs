mod push;

pub use push::{ExpoPushGateway, IPushGateway, InMemoryPushGateway, PushResponse, SentPush};

mod push;

pub use push::PushService;

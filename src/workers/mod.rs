pub mod notification_worker;

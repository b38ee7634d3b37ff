pub mod pay_fees_cmd;
pub mod refund_fee_cmd;
pub mod verify_payment_cmd;

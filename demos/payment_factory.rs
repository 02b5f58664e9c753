//! Assisted payment factory walkthrough.
//!
//! A `RealPayment` needs a `CreditService` from the container plus a date
//! window and an amount from the caller. The factory unifies both behind
//! one `create` call and returns the payment as its `Payment` interface.

use assisted_di::{
    args, Assignment, AssistedFactoryProvider, AssistedTarget, ConstructorSpec, FactoryContract,
    LoggingObserver, MethodSig, ServiceMap,
};
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
struct Date {
    day: u32,
    month: u32,
}

struct CreditService {
    gateway: String,
}

trait Payment: Send {
    fn describe(&self) -> String;
}

struct RealPayment {
    credit: Arc<CreditService>,
    start_date: Date,
    end_date: Date,
    amount_cents: u64,
}

impl Payment for RealPayment {
    fn describe(&self) -> String {
        format!(
            "{} cents from {}/{} to {}/{} via {}",
            self.amount_cents,
            self.start_date.day,
            self.start_date.month,
            self.end_date.day,
            self.end_date.month,
            self.credit.gateway
        )
    }
}

impl AssistedTarget for RealPayment {
    fn constructors() -> Vec<ConstructorSpec<Self>> {
        vec![ConstructorSpec::inject()
            .resolved::<CreditService>()
            .assisted::<Date>()
            .assisted::<Date>()
            .assisted::<u64>()
            .produce(|args| {
                Ok(RealPayment {
                    credit: args.resolved()?,
                    start_date: args.assisted()?,
                    end_date: args.assisted()?,
                    amount_cents: args.assisted()?,
                })
            })]
    }

    fn assignments() -> Vec<Assignment<Self>> {
        vec![Assignment::to(|payment| Box::new(payment) as Box<dyn Payment>)]
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut services = ServiceMap::new();
    services.insert(CreditService {
        gateway: "credit.example.net".to_string(),
    });

    let provider = AssistedFactoryProvider::new(Arc::new(services))
        .observe(Arc::new(LoggingObserver::new()));

    let contract = FactoryContract::new("PaymentFactory").method(
        MethodSig::new("create")
            .param::<Date>()
            .param::<Date>()
            .param::<u64>()
            .returns::<Box<dyn Payment>>(),
    );

    let factory = provider.provide::<RealPayment, Box<dyn Payment>>(contract)?;

    let payment = factory.create(args![
        Date { day: 1, month: 6 },
        Date { day: 30, month: 6 },
        9_950u64
    ])?;
    println!("created: {}", payment.describe());

    // A call with a missing amount fails cleanly; the factory stays usable.
    match factory.create(args![Date { day: 1, month: 7 }, Date { day: 31, month: 7 }]) {
        Err(error) => println!("rejected: {}", error),
        Ok(_) => unreachable!("two arguments cannot satisfy three parameters"),
    }

    Ok(())
}

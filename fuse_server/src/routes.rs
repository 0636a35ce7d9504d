//! Request handler definitions
//!
//! Define each route and its handler here. Handlers stay thin: the work happens in the engine APIs, which are
//! registered as app data by [`crate::server`].
//!
//! Since each worker thread processes its requests sequentially, handlers must never block. Every call to the ledger
//! or to the processor is awaited.
use std::collections::HashMap;

use actix_web::{get, web, HttpResponse, Responder};
use fuse_engine::{
    fuse_types::{NotificationParameters, Refund},
    LedgerManagement,
    NotificationApi,
    PaymentProcessor,
    RefundApi,
    TransactionSearchApi,
};
use log::*;

use crate::{
    config::{NotificationSettings, ServerOptions},
    data_objects::{UncapturedPaymentsQuery, UncapturedPaymentsResponse},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//------------------------------------------   Payment notifications  -----------------------------------------------
route!(payment_response => Post "/payment-response" impl LedgerManagement);
/// Route handler for the gateway's payment notification.
///
/// The hosted payment page posts the outcome of a payment back as a form. The notification's `MerchantSignature` is
/// checked against the configured signed fields before anything is reported to the ledger. A notification that fails
/// verification gets a 400 with the generic "Unable to process the payment" message. Otherwise the ledger's
/// acknowledgement is returned as-is.
pub async fn payment_response<L: LedgerManagement>(
    body: web::Form<HashMap<String, String>>,
    settings: web::Data<NotificationSettings>,
    api: web::Data<NotificationApi<L>>,
) -> Result<HttpResponse, ServerError> {
    let params = NotificationParameters::from(body.into_inner());
    debug!("💻️ POST payment notification with {} fields", params.len());
    let ack = api.handle(params, &settings.signed_fields, settings.secret_key.as_bytes()).await.map_err(|e| {
        debug!("💻️ Payment notification was not processed. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(ack))
}

//----------------------------------------------   Refunds  ----------------------------------------------------
route!(refund => Post "/refund" impl LedgerManagement, PaymentProcessor);
/// Route handler for refunds.
///
/// A refund that the processor declines, or whose transaction cannot be identified, is still a 200 response. The
/// `RefundResult` body says whether it succeeded and why not. Invalid requests are a 400 and upstream failures a 502.
pub async fn refund<L: LedgerManagement, P: PaymentProcessor>(
    body: web::Json<Refund>,
    api: web::Data<RefundApi<L, P>>,
) -> Result<HttpResponse, ServerError> {
    let refund = body.into_inner();
    debug!("💻️ POST refund {refund}");
    let result = api.handle(refund).await?;
    Ok(HttpResponse::Ok().json(result))
}

//----------------------------------------------   Search  ----------------------------------------------------
route!(uncaptured_payments => Get "/payments/uncaptured" impl PaymentProcessor);
pub async fn uncaptured_payments<P: PaymentProcessor>(
    query: web::Query<UncapturedPaymentsQuery>,
    options: web::Data<ServerOptions>,
    api: web::Data<TransactionSearchApi<P>>,
) -> Result<HttpResponse, ServerError> {
    let UncapturedPaymentsQuery { reference, days_ago } = query.into_inner();
    let days_ago = days_ago.unwrap_or(options.search_days);
    debug!("💻️ GET uncaptured payments for '{reference}' over the last {days_ago} days");
    let payments = api.search_uncaptured(&reference, days_ago).await?;
    Ok(HttpResponse::Ok().json(UncapturedPaymentsResponse { reference, days_ago, payments }))
}

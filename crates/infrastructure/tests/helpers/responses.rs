use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, Record, RecordType};
use hickory_proto::serialize::binary::{BinDecodable, BinEncodable, BinEncoder};
use hickory_server::authority::{MessageRequest, MessageResponse};
use hickory_server::server::{Protocol, Request, ResponseHandler, ResponseInfo};
use std::io;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// ============================================================================
// Capturing ResponseHandler
// ============================================================================

/// Encodes the response and keeps the bytes for inspection.
#[derive(Clone, Default)]
pub struct CapturingResponseHandler {
    sent: Arc<Mutex<Option<Vec<u8>>>>,
}

impl CapturingResponseHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> Message {
        let bytes = self
            .sent
            .lock()
            .unwrap()
            .clone()
            .expect("no response was sent");
        Message::from_vec(&bytes).unwrap()
    }
}

#[async_trait::async_trait]
impl ResponseHandler for CapturingResponseHandler {
    async fn send_response<'a>(
        &mut self,
        response: MessageResponse<
            '_,
            'a,
            impl Iterator<Item = &'a Record> + Send + 'a,
            impl Iterator<Item = &'a Record> + Send + 'a,
            impl Iterator<Item = &'a Record> + Send + 'a,
            impl Iterator<Item = &'a Record> + Send + 'a,
        >,
    ) -> io::Result<ResponseInfo> {
        let mut bytes = Vec::with_capacity(512);
        let header = {
            let mut encoder = BinEncoder::new(&mut bytes);
            response
                .destructive_emit(&mut encoder)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?
        };
        *self.sent.lock().unwrap() = Some(bytes);
        Ok(header.into())
    }
}

// ============================================================================
// Requests
// ============================================================================

pub fn build_message(name: &str, qtype: RecordType) -> Message {
    let mut message = Message::new();
    message.set_id(4242);
    message.set_message_type(MessageType::Query);
    message.set_op_code(OpCode::Query);
    message.set_recursion_desired(false);

    let mut query = Query::new();
    query.set_name(Name::from_str(name).unwrap());
    query.set_query_type(qtype);
    message.add_query(query);
    message
}

pub fn to_request(message: &Message) -> Request {
    let bytes = message.to_bytes().unwrap();
    let src: SocketAddr = "192.0.2.50:53000".parse().unwrap();
    Request::new(MessageRequest::from_bytes(&bytes).unwrap(), src, Protocol::Udp)
}

pub fn build_request(name: &str, qtype: RecordType) -> Request {
    to_request(&build_message(name, qtype))
}

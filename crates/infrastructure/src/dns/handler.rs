use async_trait::async_trait;
use hickory_proto::op::{Header, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::{Name, Record, RecordType};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use std::time::Instant;
use tenant_dns_application::ports::{BoxedSession, SiteDirectory};
use tenant_dns_application::services::{Zone, ZoneResolver, ZoneSettings};
use tenant_dns_domain::domain_name::{dot_count, normalize};
use tenant_dns_domain::DomainError;
use tracing::{debug, error, warn};

use super::records::RecordMapper;

/// Response sections for one query, before encoding.
#[derive(Debug)]
struct Answer {
    code: ResponseCode,
    answers: Vec<Record>,
    name_servers: Vec<Record>,
    soa: Vec<Record>,
}

impl Answer {
    fn empty(code: ResponseCode) -> Self {
        Self {
            code,
            answers: Vec::new(),
            name_servers: Vec::new(),
            soa: Vec::new(),
        }
    }

    /// NXDOMAIN or NODATA, with the zone SOA for negative caching.
    fn negative(code: ResponseCode, soa: Record) -> Self {
        Self {
            soa: vec![soa],
            ..Self::empty(code)
        }
    }

    fn records(answers: Vec<Record>, name_servers: Vec<Record>) -> Self {
        Self {
            answers,
            name_servers,
            ..Self::empty(ResponseCode::NoError)
        }
    }
}

/// Answers every query from the tenant directory.
///
/// Each request gets one directory session that the resolver and the zone
/// share; it is released once the response has been built.
pub struct AuthoritativeHandler {
    resolver: ZoneResolver,
    directory: Arc<dyn SiteDirectory>,
}

impl AuthoritativeHandler {
    pub fn new(directory: Arc<dyn SiteDirectory>, settings: Arc<ZoneSettings>) -> Self {
        Self {
            resolver: ZoneResolver::new(Arc::clone(&directory), settings),
            directory,
        }
    }

    async fn answer(&self, qname: &Name, qtype: RecordType) -> Result<Answer, DomainError> {
        let name = normalize(&qname.to_ascii());
        // No zone is ever rooted at a single label
        if dot_count(&name) < 1 {
            debug!(domain = %name, "Single-label name refused");
            return Ok(Answer::empty(ResponseCode::Refused));
        }

        let mut session = self.directory.open_session().await?;

        let Some(mut zone) = self
            .resolver
            .find_best_zone(&name, Some(&mut session))
            .await?
        else {
            debug!(domain = %name, "Outside every hosted zone");
            return Ok(Answer::empty(ResponseCode::Refused));
        };

        if name == zone.root_domain() && matches!(qtype, RecordType::SOA | RecordType::NS) {
            return Self::apex_answer(&mut zone, qtype, &mut session).await;
        }

        let Some(records) = zone.get_records(&name, Some(&mut session)).await? else {
            let soa = Self::soa(&mut zone, &mut session).await?;
            return Ok(Answer::negative(ResponseCode::NXDomain, soa));
        };

        // A CNAME answers whatever type was asked
        let answers = records
            .iter()
            .filter(|r| r.is_canonical_name() || RecordMapper::answers(r, qtype))
            .map(|r| RecordMapper::to_hickory_record(qname, r))
            .collect::<Result<Vec<_>, _>>()?;

        if answers.is_empty() {
            let soa = Self::soa(&mut zone, &mut session).await?;
            return Ok(Answer::negative(ResponseCode::NoError, soa));
        }

        Ok(Answer::records(answers, Vec::new()))
    }

    async fn apex_answer(
        zone: &mut Zone,
        qtype: RecordType,
        session: &mut BoxedSession,
    ) -> Result<Answer, DomainError> {
        let ns = RecordMapper::ns_records(zone.root_domain(), zone.nameservers(), zone.ttl())?;

        if qtype == RecordType::NS {
            return Ok(Answer::records(ns, Vec::new()));
        }

        let soa = Self::soa(zone, session).await?;
        Ok(Answer::records(vec![soa], ns))
    }

    async fn soa(zone: &mut Zone, session: &mut BoxedSession) -> Result<Record, DomainError> {
        let info = zone.info(Some(session)).await?;
        RecordMapper::soa_record(&info)
    }
}

#[async_trait]
impl RequestHandler for AuthoritativeHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let started = Instant::now();
        let mut header = Header::response_from_request(request.header());
        header.set_authoritative(true);
        header.set_recursion_available(false);

        let answer = if request.header().op_code() != OpCode::Query {
            Answer::empty(ResponseCode::NotImp)
        } else if request.header().message_type() != MessageType::Query {
            Answer::empty(ResponseCode::FormErr)
        } else if let Some(query) = request.queries().first() {
            let qname = Name::from(query.name().clone());
            let qtype = query.query_type();
            match self.answer(&qname, qtype).await {
                Ok(answer) => {
                    debug!(
                        domain = %qname,
                        record_type = %qtype,
                        rcode = ?answer.code,
                        answers = answer.answers.len(),
                        elapsed_us = started.elapsed().as_micros() as u64,
                        "Query answered"
                    );
                    answer
                }
                Err(e) => {
                    warn!(domain = %qname, record_type = %qtype, error = %e, "Query failed");
                    Answer::empty(ResponseCode::ServFail)
                }
            }
        } else {
            Answer::empty(ResponseCode::FormErr)
        };

        header.set_response_code(answer.code);
        let response = MessageResponseBuilder::from_message_request(request).build(
            header,
            answer.answers.iter(),
            answer.name_servers.iter(),
            answer.soa.iter(),
            std::iter::empty(),
        );

        response_handle
            .send_response(response)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "Failed to send DNS response");
                header.into()
            })
    }
}

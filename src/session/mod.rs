
use std::collections::BTreeSet;

use crate::attribute::*;
use crate::direction::RtpDirection;
use crate::document::SdpDocument;
use crate::error::Result;
use crate::section::SdpSection;
use crate::util::{new_session_id, resolve_track_kind, track_kind_name, ConnectionRole, TrackKind};

/// SsrcRole is the position of one RTP stream inside its media section:
/// the primary flow, its retransmission flow, or one simulcast tier.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum SsrcRole {
    #[default]
    Primary,
    Retransmission,
    SimulcastLow,
    SimulcastMid,
    SimulcastHigh,
}

/// RtcSsrc folds every "a=ssrc" line sharing one ssrc id into a single
/// record; the role comes from any "a=ssrc-group" naming the id.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RtcSsrc {
    pub ssrc: u32,
    pub role: SsrcRole,
    pub cname: String,
    pub msid: String,
    pub mslabel: String,
    pub label: String,
}

/// RtcPlan is the per-payload-type negotiable unit: one payload type's
/// rtpmap, fmtp and rtcp-fb lines folded together.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RtcPlan {
    pub payload_type: u8,
    pub codec: String,
    pub sample_rate: u32,
    /// Meaningful for audio; 0 otherwise.
    pub channels: u32,
    pub rtcp_fb: Vec<String>,
    pub fmtp: Vec<(String, String)>,
}

/// RtcMedia is the compiled view of one media section, with everything the
/// ICE, DTLS and RTP collaborators consume resolved into place.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RtcMedia {
    pub kind: TrackKind,
    pub mid: String,
    pub port: u16,
    pub proto: String,

    // rtp
    pub plans: Vec<RtcPlan>,
    pub rtp_addr: ConnectionInformation,
    pub direction: RtpDirection,
    pub ssrcs: Vec<RtcSsrc>,

    // rtx / rtcp
    pub rtcp_mux: bool,
    pub rtcp_rsize: bool,
    pub rtx_ssrc: u32,
    pub rtcp_addr: RtcpAddress,

    // ice
    pub ice_trickle: bool,
    pub ice_lite: bool,
    pub ice_renomination: bool,
    pub ice_ufrag: String,
    pub ice_pwd: String,
    pub candidates: Vec<IceCandidate>,

    // dtls
    pub role: ConnectionRole,
    pub fingerprint: Fingerprint,

    // extmap
    pub extmaps: Vec<ExtMap>,
}

impl RtcMedia {
    /// primary_ssrc returns the first primary-role stream, if any.
    pub fn primary_ssrc(&self) -> Option<&RtcSsrc> {
        self.ssrcs.iter().find(|s| s.role == SsrcRole::Primary)
    }
}

/// RtcSession is the compiled, denormalized view of one SDP document. It
/// is an independent copy: mutating it never affects the document it was
/// built from.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RtcSession {
    pub version: u32,
    pub origin: Origin,
    pub session_name: String,
    pub session_info: String,
    pub connection: ConnectionInformation,
    pub bandwidth: Bandwidth,
    pub msid_semantic: MsidSemantic,
    pub group_bundle: BTreeSet<TrackKind>,
    pub medias: Vec<RtcMedia>,
}

impl RtcSession {
    /// parse unmarshals a document and compiles it in one step. Only
    /// document-level failures (empty input) surface as errors; everything
    /// else compiles best-effort.
    pub fn parse(raw: &str) -> Result<Self> {
        let doc = SdpDocument::parse(raw)?;
        Ok(Self::from_document(&doc))
    }

    /// from_document folds a document into the compiled model. It never
    /// fails: unresolved enums come out as Invalid sentinels and
    /// correlation gaps are logged, leaving any negotiability judgment to
    /// the ICE/DTLS/RTP collaborators.
    pub fn from_document(doc: &SdpDocument) -> Self {
        let session = &doc.session;

        let msid_semantic = match session.find_attribute(ATTR_KEY_MSID_SEMANTIC) {
            Some(SdpAttribute::MsidSemantic(msid)) => msid.clone(),
            _ => MsidSemantic::default(),
        };

        let mut rtc = RtcSession {
            version: session.version().unwrap_or(0),
            origin: session.origin().cloned().unwrap_or_default(),
            session_name: session.session_name().unwrap_or("").to_owned(),
            session_info: session.information().unwrap_or("").to_owned(),
            connection: session.connection().cloned().unwrap_or_default(),
            bandwidth: session.bandwidth().cloned().unwrap_or_default(),
            msid_semantic,
            group_bundle: BTreeSet::new(),
            medias: doc
                .medias
                .iter()
                .map(|media| compile_media(session, media))
                .collect(),
        };

        if let Some(SdpAttribute::Group(group)) = session.find_attribute(ATTR_KEY_GROUP) {
            if group.semantic == SEMANTIC_TOKEN_BUNDLE {
                for mid in &group.mids {
                    match rtc.medias.iter().find(|media| &media.mid == mid) {
                        Some(media) => {
                            rtc.group_bundle.insert(media.kind);
                        }
                        None => log::warn!("BUNDLE group references unknown mid `{mid}`"),
                    }
                }
            }
        }

        rtc
    }

    /// to_document re-expands the compiled model into a canonical document,
    /// for emitting the answer side of a negotiation.
    pub fn to_document(&self) -> SdpDocument {
        let mut doc = SdpDocument::default();
        let session = &mut doc.session;

        session.push(SdpLine::Version(self.version));
        session.push(SdpLine::Origin(self.origin.clone()));
        session.push(SdpLine::SessionName(if self.session_name.is_empty() {
            "-".to_owned()
        } else {
            self.session_name.clone()
        }));
        if !self.session_info.is_empty() {
            session.push(SdpLine::Information(self.session_info.clone()));
        }
        if self.connection != ConnectionInformation::default() {
            session.push(SdpLine::Connection(self.connection.clone()));
        }
        session.push(SdpLine::Timing(Timing::default()));
        if self.bandwidth.bandwidth > 0 {
            session.push(SdpLine::Bandwidth(self.bandwidth.clone()));
        }

        if !self.group_bundle.is_empty() {
            let mids = self
                .medias
                .iter()
                .filter(|media| self.group_bundle.contains(&media.kind))
                .map(|media| media.mid.clone())
                .collect();
            session.push(SdpLine::Attribute(SdpAttribute::Group(Group {
                semantic: SEMANTIC_TOKEN_BUNDLE.to_owned(),
                mids,
            })));
        }
        if !self.msid_semantic.token.is_empty() {
            session.push(SdpLine::Attribute(SdpAttribute::MsidSemantic(
                self.msid_semantic.clone(),
            )));
        }
        if self.medias.iter().any(|media| media.ice_lite) {
            session.push(SdpLine::Attribute(SdpAttribute::Other {
                key: ATTR_KEY_ICELITE.to_owned(),
                value: None,
            }));
        }

        for media in &self.medias {
            doc.medias.push(expand_media(media));
        }

        doc
    }

    /// marshal re-expands the model and emits canonical SDP text.
    pub fn marshal(&self) -> String {
        self.to_document().marshal()
    }
}

/// update_origin keeps JSEP origin bookkeeping across renegotiation: the
/// first description stores its origin (minting a session id when the model
/// carries none), later ones reuse the stored id and bump the version.
pub fn update_origin(saved: &mut Origin, session: &mut RtcSession) {
    if saved.session_version == 0 {
        if session.origin.session_id == 0 {
            session.origin.session_id = new_session_id();
        }
        if session.origin.session_version == 0 {
            session.origin.session_version = 1;
        }
        saved.session_id = session.origin.session_id;
        saved.session_version = session.origin.session_version;
    } else {
        session.origin.session_id = saved.session_id;
        saved.session_version += 1;
        session.origin.session_version = saved.session_version;
    }
}

/// Scalar attributes hoisted to the session scope in common WebRTC offers
/// are read media-level first with a session-level fallback.
fn fallback_attr_value<'a>(
    media: &'a SdpSection,
    session: &'a SdpSection,
    name: &str,
) -> Option<&'a str> {
    media.attr_value(name).or_else(|| session.attr_value(name))
}

fn fallback_attribute<'a>(
    media: &'a SdpSection,
    session: &'a SdpSection,
    name: &str,
) -> Option<&'a SdpAttribute> {
    media
        .find_attribute(name)
        .or_else(|| session.find_attribute(name))
}

fn compile_media(session: &SdpSection, media: &SdpSection) -> RtcMedia {
    let media_name = media.media().cloned().unwrap_or_default();

    let mut direction = media.direction();
    if direction == RtpDirection::Invalid {
        direction = session.direction();
    }

    let ice_options = fallback_attr_value(media, session, ATTR_KEY_ICE_OPTIONS).unwrap_or("");
    let fingerprint = match fallback_attribute(media, session, ATTR_KEY_FINGERPRINT) {
        Some(SdpAttribute::Fingerprint(fingerprint)) => fingerprint.clone(),
        _ => Fingerprint::default(),
    };
    let role = match fallback_attribute(media, session, ATTR_KEY_SETUP) {
        Some(SdpAttribute::Setup(role)) => *role,
        _ => ConnectionRole::Invalid,
    };
    let rtcp_addr = match media.find_attribute(ATTR_KEY_RTCP) {
        Some(SdpAttribute::Rtcp(rtcp)) => rtcp.clone(),
        _ => RtcpAddress::default(),
    };

    let mut rtc = RtcMedia {
        kind: resolve_track_kind(&media_name.media),
        mid: media.attr_value(ATTR_KEY_MID).unwrap_or("").to_owned(),
        port: media_name.port,
        proto: media_name.proto.clone(),
        plans: vec![],
        rtp_addr: media
            .connection()
            .or_else(|| session.connection())
            .cloned()
            .unwrap_or_default(),
        direction,
        ssrcs: vec![],
        rtcp_mux: media.has_attribute(ATTR_KEY_RTCPMUX),
        rtcp_rsize: media.has_attribute(ATTR_KEY_RTCPRSIZE),
        rtx_ssrc: 0,
        rtcp_addr,
        ice_trickle: ice_options.contains("trickle"),
        ice_lite: media.has_attribute(ATTR_KEY_ICELITE) || session.has_attribute(ATTR_KEY_ICELITE),
        ice_renomination: ice_options.contains("renomination"),
        ice_ufrag: fallback_attr_value(media, session, ATTR_KEY_ICE_UFRAG)
            .unwrap_or("")
            .to_owned(),
        ice_pwd: fallback_attr_value(media, session, ATTR_KEY_ICE_PWD)
            .unwrap_or("")
            .to_owned(),
        candidates: vec![],
        role,
        fingerprint,
        extmaps: vec![],
    };

    // Multi-valued attributes keep source order; candidate order is
    // priority-significant and must not be re-sorted.
    for attr in media.attributes() {
        match attr {
            SdpAttribute::Candidate(candidate) => rtc.candidates.push(candidate.clone()),
            SdpAttribute::ExtMap(extmap) => rtc.extmaps.push(extmap.clone()),
            _ => {}
        }
    }

    compile_plans(&mut rtc, &media_name, media);
    compile_ssrcs(&mut rtc, media);

    rtc
}

/// compile_plans walks the declared format list and folds each numeric
/// payload type's rtpmap/fmtp/rtcp-fb lines into one plan. A payload type
/// with no rtpmap still yields a plan with defaulted codec fields, since
/// fmtp/feedback-only negotiation is legal. Non-numeric format tokens
/// (data channel subprotocols) yield no plan.
fn compile_plans(rtc: &mut RtcMedia, media_name: &MediaName, media: &SdpSection) {
    for format in &media_name.formats {
        let Ok(payload_type) = format.parse::<u8>() else {
            continue;
        };

        let mut plan = RtcPlan {
            payload_type,
            ..Default::default()
        };
        for attr in media.attributes() {
            match attr {
                SdpAttribute::RtpMap(rtpmap) if rtpmap.payload_type == payload_type => {
                    if plan.codec.is_empty() {
                        plan.codec = rtpmap.codec.clone();
                        plan.sample_rate = rtpmap.clock_rate;
                        plan.channels = rtpmap.channels;
                    }
                }
                SdpAttribute::RtcpFeedback(fb) if fb.payload_type == payload_type => {
                    plan.rtcp_fb.push(fb.feedback.join(" "));
                }
                SdpAttribute::Fmtp(fmtp) if fmtp.payload_type == payload_type => {
                    plan.fmtp.extend(fmtp.parameters.iter().cloned());
                }
                _ => {}
            }
        }
        rtc.plans.push(plan);
    }
}

/// compile_ssrcs folds ssrc lines by id in first-appearance order, then
/// resolves roles from the ssrc groups. A group member missing from the
/// declared ssrc set is a correlation gap: logged, and still recorded where
/// possible (rtx_ssrc), since downstream negotiation is better positioned
/// to reject it with context.
fn compile_ssrcs(rtc: &mut RtcMedia, media: &SdpSection) {
    for attr in media.attributes() {
        let SdpAttribute::Ssrc(item) = attr else {
            continue;
        };

        let idx = match rtc.ssrcs.iter().position(|s| s.ssrc == item.ssrc) {
            Some(idx) => idx,
            None => {
                rtc.ssrcs.push(RtcSsrc {
                    ssrc: item.ssrc,
                    ..Default::default()
                });
                rtc.ssrcs.len() - 1
            }
        };
        let record = &mut rtc.ssrcs[idx];
        match item.attribute.as_str() {
            "cname" => record.cname = item.value.clone(),
            "msid" => record.msid = item.value.clone(),
            "mslabel" => record.mslabel = item.value.clone(),
            "label" => record.label = item.value.clone(),
            other => log::trace!("ignoring ssrc attribute `{other}`"),
        }
    }

    for attr in media.attributes() {
        let SdpAttribute::SsrcGroup(group) = attr else {
            continue;
        };

        match group {
            SsrcGroup::Fid { rtp, rtx } => {
                rtc.rtx_ssrc = *rtx;
                assign_role(rtc, *rtp, SsrcRole::Primary);
                assign_role(rtc, *rtx, SsrcRole::Retransmission);
            }
            SsrcGroup::Sim { low, mid, high } => {
                assign_role(rtc, *low, SsrcRole::SimulcastLow);
                assign_role(rtc, *mid, SsrcRole::SimulcastMid);
                assign_role(rtc, *high, SsrcRole::SimulcastHigh);
            }
        }
    }
}

fn assign_role(rtc: &mut RtcMedia, ssrc: u32, role: SsrcRole) {
    match rtc.ssrcs.iter_mut().find(|s| s.ssrc == ssrc) {
        Some(record) => record.role = role,
        None => log::warn!("ssrc-group references undeclared ssrc {ssrc}"),
    }
}

fn expand_media(media: &RtcMedia) -> SdpSection {
    let mut section = SdpSection::default();

    section.push(SdpLine::Media(MediaName {
        media: track_kind_name(media.kind).to_owned(),
        port: media.port,
        proto: media.proto.clone(),
        formats: media
            .plans
            .iter()
            .map(|plan| plan.payload_type.to_string())
            .collect(),
    }));
    section.push(SdpLine::Connection(media.rtp_addr.clone()));

    if !media.mid.is_empty() {
        section.push(SdpLine::Attribute(SdpAttribute::Mid(media.mid.clone())));
    }
    if media.direction != RtpDirection::Invalid {
        section.push(SdpLine::Attribute(SdpAttribute::Other {
            key: media.direction.to_string(),
            value: None,
        }));
    }

    if !media.ice_ufrag.is_empty() {
        section.push(SdpLine::Attribute(SdpAttribute::IceUfrag(
            media.ice_ufrag.clone(),
        )));
    }
    if !media.ice_pwd.is_empty() {
        section.push(SdpLine::Attribute(SdpAttribute::IcePwd(
            media.ice_pwd.clone(),
        )));
    }
    let mut options = vec![];
    if media.ice_trickle {
        options.push("trickle");
    }
    if media.ice_renomination {
        options.push("renomination");
    }
    if !options.is_empty() {
        section.push(SdpLine::Attribute(SdpAttribute::IceOptions(
            options.join(" "),
        )));
    }
    for candidate in &media.candidates {
        section.push(SdpLine::Attribute(SdpAttribute::Candidate(
            candidate.clone(),
        )));
    }

    if !media.fingerprint.digest.is_empty() {
        section.push(SdpLine::Attribute(SdpAttribute::Fingerprint(
            media.fingerprint.clone(),
        )));
    }
    if media.role != ConnectionRole::Invalid {
        section.push(SdpLine::Attribute(SdpAttribute::Setup(media.role)));
    }

    if media.rtcp_addr.port > 0 {
        section.push(SdpLine::Attribute(SdpAttribute::Rtcp(
            media.rtcp_addr.clone(),
        )));
    }
    if media.rtcp_mux {
        section.push(SdpLine::Attribute(SdpAttribute::Other {
            key: ATTR_KEY_RTCPMUX.to_owned(),
            value: None,
        }));
    }
    if media.rtcp_rsize {
        section.push(SdpLine::Attribute(SdpAttribute::Other {
            key: ATTR_KEY_RTCPRSIZE.to_owned(),
            value: None,
        }));
    }

    for extmap in &media.extmaps {
        section.push(SdpLine::Attribute(SdpAttribute::ExtMap(extmap.clone())));
    }

    for plan in &media.plans {
        // A plan folded from fmtp/feedback lines alone has no codec name;
        // emitting an empty rtpmap for it would not reparse.
        if !plan.codec.is_empty() {
            section.push(SdpLine::Attribute(SdpAttribute::RtpMap(RtpMap {
                payload_type: plan.payload_type,
                codec: plan.codec.clone(),
                clock_rate: plan.sample_rate,
                channels: plan.channels,
            })));
        }
        for fb in &plan.rtcp_fb {
            section.push(SdpLine::Attribute(SdpAttribute::RtcpFeedback(
                RtcpFeedback {
                    payload_type: plan.payload_type,
                    feedback: fb.split_whitespace().map(|s| s.to_owned()).collect(),
                },
            )));
        }
        if !plan.fmtp.is_empty() {
            section.push(SdpLine::Attribute(SdpAttribute::Fmtp(Fmtp {
                payload_type: plan.payload_type,
                parameters: plan.fmtp.clone(),
            })));
        }
    }

    expand_ssrcs(media, &mut section);

    section
}

fn expand_ssrcs(media: &RtcMedia, section: &mut SdpSection) {
    let sim: Vec<u32> = [
        SsrcRole::SimulcastLow,
        SsrcRole::SimulcastMid,
        SsrcRole::SimulcastHigh,
    ]
    .iter()
    .filter_map(|role| {
        media
            .ssrcs
            .iter()
            .find(|s| s.role == *role)
            .map(|s| s.ssrc)
    })
    .collect();
    if sim.len() == 3 {
        section.push(SdpLine::Attribute(SdpAttribute::SsrcGroup(
            SsrcGroup::Sim {
                low: sim[0],
                mid: sim[1],
                high: sim[2],
            },
        )));
    }
    if media.rtx_ssrc > 0 {
        if let Some(primary) = media.primary_ssrc() {
            section.push(SdpLine::Attribute(SdpAttribute::SsrcGroup(
                SsrcGroup::Fid {
                    rtp: primary.ssrc,
                    rtx: media.rtx_ssrc,
                },
            )));
        }
    }

    for record in &media.ssrcs {
        for (name, value) in [
            ("cname", &record.cname),
            ("msid", &record.msid),
            ("mslabel", &record.mslabel),
            ("label", &record.label),
        ] {
            if !value.is_empty() {
                section.push(SdpLine::Attribute(SdpAttribute::Ssrc(Ssrc {
                    ssrc: record.ssrc,
                    attribute: name.to_owned(),
                    value: value.clone(),
                })));
            }
        }
    }
}

//! # Event Pipeline Service
//!
//! The write, verify and status entry points.
//!
//! ## Write order
//!
//! 1. Canonicalize `data` and rebuild the signed typed-data message
//! 2. Recover the signer; reject malformed signatures and mismatched claims
//! 3. Look up the signer's role on the ledger and check the matrix
//! 4. Draw a salt and commit to the canonical bytes
//! 5. Seal the canonical bytes when a key is configured
//! 6. Persist the artifact under a fresh identifier
//! 7. Open a `pending` reconciliation entry
//!
//! Signature runs before role lookup so an invalid request never costs a
//! ledger round trip. Nothing is persisted until steps 1-5 succeed.

use crate::context::PipelineContext;
use crate::domain::entities::{
    AnchoredVerification, StatusReport, VerificationReport, WriteReceipt, WriteRequest,
};
use crate::errors::PipelineError;
use crate::ports::outbound::LedgerError;
use shared_types::{
    Commitment, EncryptionMeta, EventEnvelope, HexBytes, Role, StoredArtifact,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use ta_01_commitment::{
    canonical_payload, canonicalize, commit_bytes, commit_payload, generate_salt,
    CanonicalizationError,
};
use ta_02_signature_verification::{EventMessage, SignatureVerificationApi};
use ta_03_artifact_storage::{validate_identifier, validate_namespace};
use ta_04_reconciliation::{ReconciliationStatus, TrackerEntry};
use tracing::{debug, error, info, warn};

/// Entry points of the commitment pipeline.
#[derive(Clone)]
pub struct EventPipeline {
    ctx: Arc<PipelineContext>,
}

impl EventPipeline {
    pub fn new(ctx: Arc<PipelineContext>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &Arc<PipelineContext> {
        &self.ctx
    }

    /// Validate, commit and persist a signed event.
    ///
    /// The receipt is the only place the salt is returned. The commitment is
    /// not anchored; see `write_and_anchor`.
    pub async fn write(&self, request: &WriteRequest) -> Result<WriteReceipt, PipelineError> {
        let payload = &request.payload;
        let message = EventMessage::from_payload(payload)?;

        let check = self.ctx.verifier.verify_signer(
            &message,
            request.signature.as_slice(),
            request.claimed_signer,
        )?;
        if !check.matches {
            warn!(
                claimed = %check.claimed,
                recovered = %check.recovered,
                "[ta-05] signature does not belong to the claimed signer"
            );
            return Err(PipelineError::SignatureMismatch {
                claimed: check.claimed,
                recovered: check.recovered,
            });
        }
        let signer = check.recovered;

        let code = self
            .ctx
            .ledger
            .role_of(&signer)
            .await
            .map_err(|e| ledger_unavailable(None, e))?;
        let role = Role::from_code(code).unwrap_or_else(|_| {
            warn!(signer = %signer, code, "[ta-05] unknown role code, treating as unregistered");
            Role::Unregistered
        });
        if !self.ctx.authorization.is_allowed(payload.event_type, role) {
            warn!(
                signer = %signer,
                role = %role,
                event_type = %payload.event_type,
                "[ta-05] role may not submit this event type"
            );
            return Err(PipelineError::RoleDenied {
                signer,
                role,
                event_type: payload.event_type,
            });
        }

        let salt = generate_salt();
        let output = commit_payload(payload, &salt)?;
        self.ctx.store.check_size(output.canonical.len())?;

        let mut envelope = EventEnvelope {
            payload: payload.clone(),
            signer,
            signature: request.signature.clone(),
            salt,
            commitment: output.commitment,
            encryption: None,
            created_at: self.ctx.time_source.now(),
        };
        let artifact = match self.ctx.encryption.seal(&output.canonical)? {
            Some((meta, ciphertext)) => {
                envelope.encryption = Some(meta);
                StoredArtifact::Encrypted {
                    envelope,
                    ciphertext: HexBytes(ciphertext),
                }
            }
            None => StoredArtifact::Plaintext {
                envelope,
                canonical: String::from_utf8(output.canonical).map_err(|_| {
                    CanonicalizationError::Unsupported("canonical form is not UTF-8".to_string())
                })?,
            },
        };
        let encrypted = artifact.is_encrypted();
        let bytes = artifact.to_bytes()?;

        let location = self
            .ctx
            .store
            .put(&payload.batch_id.namespace(), &bytes)
            .await?;
        let entry = self.ctx.tracker.open(&location.identifier);

        info!(
            namespace = %location.namespace,
            identifier = %location.identifier,
            commitment = %output.commitment,
            event_type = %payload.event_type,
            encrypted,
            "[ta-05] event persisted"
        );

        Ok(WriteReceipt {
            namespace: location.namespace,
            identifier: location.identifier,
            commitment: output.commitment,
            salt,
            status: entry.status,
            external_reference: entry.external_reference,
            encrypted,
        })
    }

    /// `write`, then anchor the commitment on the ledger.
    ///
    /// # Errors
    ///
    /// `LedgerUnavailable { identifier: Some(..) }` when anchoring fails. The
    /// artifact stays persisted and `pending`; the caller resolves it later
    /// through `update_status`.
    pub async fn write_and_anchor(
        &self,
        request: &WriteRequest,
    ) -> Result<WriteReceipt, PipelineError> {
        let mut receipt = self.write(request).await?;

        let anchored = self
            .ctx
            .ledger
            .anchor_commitment(
                &request.payload.batch_id,
                &receipt.commitment,
                request.payload.event_type,
            )
            .await;
        let reference = match anchored {
            Ok(reference) => reference,
            Err(e) => {
                warn!(
                    identifier = %receipt.identifier,
                    "[ta-05] anchoring failed, artifact left pending: {}",
                    e
                );
                return Err(ledger_unavailable(Some(&receipt.identifier), e));
            }
        };

        let entry = self.ctx.tracker.resolve(
            &receipt.identifier,
            ReconciliationStatus::Confirmed,
            Some(reference),
        )?;
        receipt.status = entry.status;
        receipt.external_reference = entry.external_reference;
        Ok(receipt)
    }

    /// Re-derive the commitment of a stored artifact.
    ///
    /// A mismatch is a normal outcome (`matches == false`), not an error. An
    /// encrypted body that fails authentication is `AuthenticationFailed`.
    pub async fn verify(
        &self,
        namespace: &str,
        identifier: &str,
    ) -> Result<VerificationReport, PipelineError> {
        let (namespace, artifact) = self.load(namespace, identifier).await?;
        self.check_artifact(namespace, identifier, &artifact)
    }

    /// `verify`, plus whether the recomputed commitment was anchored for the
    /// batch.
    pub async fn verify_anchored(
        &self,
        namespace: &str,
        identifier: &str,
    ) -> Result<AnchoredVerification, PipelineError> {
        let (namespace, artifact) = self.load(namespace, identifier).await?;
        let report = self.check_artifact(namespace, identifier, &artifact)?;

        let anchors = self
            .ctx
            .ledger
            .anchored_commitments(&artifact.envelope().payload.batch_id)
            .await
            .map_err(|e| ledger_unavailable(None, e))?;
        let anchored = anchors
            .iter()
            .any(|c| commitments_equal(c, &report.recomputed));
        if !anchored {
            warn!(
                namespace = %report.namespace,
                identifier = %identifier,
                "[ta-05] commitment not found among anchored digests"
            );
        }

        Ok(AnchoredVerification { report, anchored })
    }

    /// Canonical bytes of a stored event, decrypting when needed.
    ///
    /// # Errors
    ///
    /// - `DecryptionKeyUnavailable` for an encrypted artifact with no key
    /// - `AuthenticationFailed` when the ciphertext was altered
    /// - `MalformedArtifact` when the recovered bytes do not hash to the
    ///   recorded commitment
    pub async fn recover_plaintext(
        &self,
        namespace: &str,
        identifier: &str,
    ) -> Result<Vec<u8>, PipelineError> {
        let (namespace, artifact) = self.load(namespace, identifier).await?;
        let envelope = artifact.envelope();

        let canonical = match &artifact {
            StoredArtifact::Plaintext { canonical, .. } => canonical.as_bytes().to_vec(),
            StoredArtifact::Encrypted { ciphertext, .. } => {
                let meta = encryption_meta(envelope)?;
                match self.ctx.encryption.open(meta, ciphertext.as_slice()) {
                    Some(Ok(plaintext)) => plaintext,
                    Some(Err(e)) => {
                        error!(
                            namespace = %namespace,
                            identifier = %identifier,
                            "[ta-05] ciphertext failed authentication"
                        );
                        return Err(e.into());
                    }
                    None => return Err(PipelineError::DecryptionKeyUnavailable),
                }
            }
        };

        let recomputed = commit_bytes(&canonical, &envelope.salt);
        if !commitments_equal(&recomputed, &envelope.commitment) {
            error!(
                namespace = %namespace,
                identifier = %identifier,
                "[ta-05] recovered bytes do not match the recorded commitment"
            );
            return Err(PipelineError::MalformedArtifact {
                reason: "recovered bytes do not match the recorded commitment".to_string(),
            });
        }
        Ok(canonical)
    }

    /// Record the ledger outcome for an artifact.
    ///
    /// A second call never changes an already-resolved entry; the first
    /// recorded outcome is returned.
    pub async fn update_status(
        &self,
        identifier: &str,
        status: ReconciliationStatus,
        external_reference: Option<String>,
    ) -> Result<StatusReport, PipelineError> {
        validate_identifier(identifier)?;
        let entry = self
            .ctx
            .tracker
            .resolve(identifier, status, external_reference)?;
        Ok(status_report(entry, true))
    }

    /// Anchoring status of an artifact.
    ///
    /// The artifact must live in `namespace` and belong to its batch before
    /// any tracker state is returned. An artifact that exists in the store
    /// with no tracker entry (the write was interrupted after persisting) is
    /// adopted as `pending` and reported with `tracked == false`.
    pub async fn status(
        &self,
        namespace: &str,
        identifier: &str,
    ) -> Result<StatusReport, PipelineError> {
        validate_namespace(namespace)?;
        validate_identifier(identifier)?;
        let (namespace, _) = self.load(namespace, identifier).await?;

        if let Ok(entry) = self.ctx.tracker.get(identifier) {
            return Ok(status_report(entry, true));
        }

        warn!(
            namespace = %namespace,
            identifier = %identifier,
            "[ta-05] untracked artifact adopted as pending"
        );
        let entry = self.ctx.tracker.open(identifier);
        Ok(status_report(entry, false))
    }

    /// Parse a stored artifact.
    pub async fn read_artifact(
        &self,
        namespace: &str,
        identifier: &str,
    ) -> Result<StoredArtifact, PipelineError> {
        self.load(namespace, identifier)
            .await
            .map(|(_, artifact)| artifact)
    }

    /// Identifiers stored for a batch.
    pub async fn list(&self, namespace: &str) -> Result<Vec<String>, PipelineError> {
        Ok(self.ctx.store.list(namespace).await?)
    }

    /// Entries still waiting for a ledger outcome, oldest first.
    pub fn pending_entries(&self) -> Vec<TrackerEntry> {
        self.ctx
            .tracker
            .entries_with_status(ReconciliationStatus::Pending)
    }

    async fn load(
        &self,
        namespace: &str,
        identifier: &str,
    ) -> Result<(String, StoredArtifact), PipelineError> {
        let namespace = validate_namespace(namespace)?;
        let bytes = self.ctx.store.get(&namespace, identifier).await?;

        let artifact = StoredArtifact::from_bytes(&bytes).map_err(|e| {
            error!(
                namespace = %namespace,
                identifier = %identifier,
                "[ta-05] stored artifact does not parse: {}",
                e
            );
            PipelineError::from(e)
        })?;
        if artifact.envelope().payload.batch_id.namespace() != namespace {
            error!(
                namespace = %namespace,
                identifier = %identifier,
                "[ta-05] artifact batch differs from its namespace"
            );
            return Err(PipelineError::MalformedArtifact {
                reason: "artifact batch differs from its namespace".to_string(),
            });
        }
        Ok((namespace, artifact))
    }

    fn check_artifact(
        &self,
        namespace: String,
        identifier: &str,
        artifact: &StoredArtifact,
    ) -> Result<VerificationReport, PipelineError> {
        let envelope = artifact.envelope();
        let canonical = canonicalize(&canonical_payload(&envelope.payload))?;
        let recomputed = commit_bytes(&canonical, &envelope.salt);
        let commitment_matches = commitments_equal(&recomputed, &envelope.commitment);

        let (body_matches, ciphertext_checked) = match artifact {
            StoredArtifact::Plaintext {
                canonical: stored, ..
            } => (bool::from(stored.as_bytes().ct_eq(&canonical)), false),
            StoredArtifact::Encrypted { ciphertext, .. } => {
                let meta = encryption_meta(envelope)?;
                match self.ctx.encryption.open(meta, ciphertext.as_slice()) {
                    Some(Ok(plaintext)) => (bool::from(plaintext.ct_eq(&canonical)), true),
                    Some(Err(e)) => {
                        error!(
                            namespace = %namespace,
                            identifier = %identifier,
                            "[ta-05] ciphertext failed authentication"
                        );
                        return Err(e.into());
                    }
                    None => {
                        debug!("[ta-05] no key configured, ciphertext not checked");
                        (true, false)
                    }
                }
            }
        };

        let matches = commitment_matches && body_matches;
        if matches {
            info!(
                namespace = %namespace,
                identifier = %identifier,
                ciphertext_checked,
                "[ta-05] commitment verified"
            );
        } else {
            warn!(
                namespace = %namespace,
                identifier = %identifier,
                commitment_matches,
                body_matches,
                "[ta-05] verification mismatch"
            );
        }

        Ok(VerificationReport {
            namespace,
            identifier: identifier.to_string(),
            recomputed,
            recorded: envelope.commitment,
            matches,
            encrypted: artifact.is_encrypted(),
            ciphertext_checked,
        })
    }
}

fn encryption_meta(envelope: &EventEnvelope) -> Result<&EncryptionMeta, PipelineError> {
    envelope
        .encryption
        .as_ref()
        .ok_or_else(|| PipelineError::MalformedArtifact {
            reason: "encrypted artifact lacks encryption metadata".to_string(),
        })
}

fn commitments_equal(a: &Commitment, b: &Commitment) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

fn status_report(entry: TrackerEntry, tracked: bool) -> StatusReport {
    StatusReport {
        identifier: entry.identifier,
        status: entry.status,
        external_reference: entry.external_reference,
        tracked,
    }
}

fn ledger_unavailable(identifier: Option<&str>, e: LedgerError) -> PipelineError {
    PipelineError::LedgerUnavailable {
        identifier: identifier.map(str::to_string),
        reason: e.to_string(),
    }
}

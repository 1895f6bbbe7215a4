/// Applied on startup. The partial unique indexes back the "one active
/// booking per pet" and "one active appointment per vet slot" invariants at
/// the storage boundary, so a lost race surfaces as a constraint violation
/// instead of a silent double-booking.
pub const QUERY_INIT_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS buyer (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR NOT NULL,
    email VARCHAR NOT NULL UNIQUE,
    phone VARCHAR,
    created_at TIMESTAMP NOT NULL
);
CREATE TABLE IF NOT EXISTS seller (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR NOT NULL,
    email VARCHAR NOT NULL UNIQUE,
    phone VARCHAR,
    created_at TIMESTAMP NOT NULL
);
CREATE TABLE IF NOT EXISTS vet (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR NOT NULL,
    email VARCHAR NOT NULL UNIQUE,
    clinic_name VARCHAR NOT NULL,
    created_at TIMESTAMP NOT NULL
);
CREATE TABLE IF NOT EXISTS vet_service (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    vet_id INTEGER NOT NULL REFERENCES vet(id),
    service_name VARCHAR NOT NULL,
    descriptions VARCHAR NOT NULL,
    price VARCHAR NOT NULL,
    created_at TIMESTAMP NOT NULL
);
CREATE TABLE IF NOT EXISTS pet (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    external_id VARCHAR NOT NULL UNIQUE,
    seller_id INTEGER NOT NULL REFERENCES seller(id),
    animal_type VARCHAR NOT NULL,
    breed VARCHAR NOT NULL,
    pet_name VARCHAR NOT NULL,
    pet_age INTEGER NOT NULL,
    descriptions VARCHAR NOT NULL,
    image_urls VARCHAR NOT NULL DEFAULT '[]',
    status VARCHAR NOT NULL DEFAULT 'available',
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL
);
CREATE TABLE IF NOT EXISTS booking (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id INTEGER NOT NULL REFERENCES pet(id),
    buyer_id INTEGER NOT NULL REFERENCES buyer(id),
    status VARCHAR NOT NULL DEFAULT 'pending',
    requested_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_booking_active_pet
    ON booking(pet_id) WHERE status IN ('pending','accepted');
CREATE TABLE IF NOT EXISTS service_booking (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    buyer_id INTEGER REFERENCES buyer(id),
    seller_id INTEGER REFERENCES seller(id),
    vet_id INTEGER NOT NULL REFERENCES vet(id),
    service_id INTEGER NOT NULL REFERENCES vet_service(id),
    appointment_time TIMESTAMP NOT NULL,
    status VARCHAR NOT NULL DEFAULT 'pending',
    decline_reason VARCHAR,
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL,
    CHECK ((buyer_id IS NULL) <> (seller_id IS NULL))
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_service_booking_active_slot
    ON service_booking(vet_id, appointment_time) WHERE status IN ('pending','accepted');
"#;

pub const QUERY_INSERT_BUYER: &str = r#"
INSERT INTO buyer(name,email,phone,created_at) VALUES($1,$2,$3,$4);
"#;

pub const QUERY_GET_BUYER: &str = r#"
SELECT id,name,email,phone,created_at FROM buyer WHERE id=$1;
"#;

pub const QUERY_INSERT_SELLER: &str = r#"
INSERT INTO seller(name,email,phone,created_at) VALUES($1,$2,$3,$4);
"#;

pub const QUERY_GET_SELLER: &str = r#"
SELECT id,name,email,phone,created_at FROM seller WHERE id=$1;
"#;

pub const QUERY_INSERT_VET: &str = r#"
INSERT INTO vet(name,email,clinic_name,created_at) VALUES($1,$2,$3,$4);
"#;

pub const QUERY_GET_VET: &str = r#"
SELECT id,name,email,clinic_name,created_at FROM vet WHERE id=$1;
"#;

pub const QUERY_INSERT_VET_SERVICE: &str = r#"
INSERT INTO vet_service(vet_id,service_name,descriptions,price,created_at)
VALUES($1,$2,$3,$4,$5);
"#;

pub const QUERY_GET_VET_SERVICE: &str = r#"
SELECT id,vet_id,service_name,descriptions,price,created_at
FROM vet_service
WHERE id=$1;
"#;

pub const QUERY_GET_SERVICES_BY_VET: &str = r#"
SELECT id,vet_id,service_name,descriptions,price,created_at
FROM vet_service
WHERE vet_id=$1
ORDER BY created_at DESC;
"#;

pub const QUERY_INSERT_PET: &str = r#"
INSERT INTO pet (
    external_id,seller_id,animal_type,breed,pet_name,
    pet_age,descriptions,image_urls,status,
    created_at,updated_at
) VALUES(
    $1,$2,$3,$4,$5,
    $6,$7,$8,$9,
    $10,$11
);
"#;

pub const QUERY_GET_PET: &str = r#"
SELECT
    id,external_id,seller_id,animal_type,breed,pet_name,
    pet_age,descriptions,image_urls,status,created_at,updated_at
FROM pet
WHERE id=$1;
"#;

pub const QUERY_GET_AVAILABLE_PETS: &str = r#"
SELECT
    id,external_id,seller_id,animal_type,breed,pet_name,
    pet_age,descriptions,image_urls,status,created_at,updated_at
FROM pet
WHERE status='available'
ORDER BY created_at DESC;
"#;

pub const QUERY_GET_PETS_BY_SELLER: &str = r#"
SELECT
    id,external_id,seller_id,animal_type,breed,pet_name,
    pet_age,descriptions,image_urls,status,created_at,updated_at
FROM pet
WHERE seller_id=$1
ORDER BY created_at DESC;
"#;

pub const QUERY_SET_PET_STATUS: &str = r#"
UPDATE pet SET status=$2, updated_at=$3 WHERE id=$1;
"#;

pub const QUERY_GET_ACTIVE_BOOKING_FOR_PET: &str = r#"
SELECT id FROM booking
WHERE pet_id=$1 AND status IN ('pending','accepted')
LIMIT 1;
"#;

pub const QUERY_INSERT_BOOKING: &str = r#"
INSERT INTO booking(pet_id,buyer_id,status,requested_at,updated_at)
VALUES($1,$2,$3,$4,$5);
"#;

pub const QUERY_GET_BOOKING: &str = r#"
SELECT id,pet_id,buyer_id,status,requested_at,updated_at
FROM booking
WHERE id=$1;
"#;

pub const QUERY_SET_BOOKING_STATUS: &str = r#"
UPDATE booking SET status=$2, updated_at=$3 WHERE id=$1;
"#;

pub const QUERY_GET_SELLER_BOOKINGS: &str = r#"
SELECT
    b.id,b.pet_id,b.buyer_id,b.status,b.requested_at,b.updated_at,
    p.external_id AS pet_external_id,p.seller_id,p.animal_type,p.breed,
    p.pet_name,p.pet_age,p.descriptions,p.image_urls,p.status AS pet_status,
    p.created_at AS pet_created_at,p.updated_at AS pet_updated_at,
    u.name AS buyer_name,u.email AS buyer_email,u.phone AS buyer_phone,
    u.created_at AS buyer_created_at
FROM booking AS b
INNER JOIN pet AS p ON (p.id = b.pet_id)
INNER JOIN buyer AS u ON (u.id = b.buyer_id)
WHERE p.seller_id = $1
ORDER BY b.requested_at DESC;
"#;

pub const QUERY_GET_ACTIVE_APPOINTMENT_AT: &str = r#"
SELECT id FROM service_booking
WHERE vet_id=$1 AND appointment_time=$2 AND status IN ('pending','accepted')
LIMIT 1;
"#;

pub const QUERY_INSERT_SERVICE_BOOKING: &str = r#"
INSERT INTO service_booking(
    buyer_id,seller_id,vet_id,service_id,appointment_time,
    status,decline_reason,created_at,updated_at
) VALUES($1,$2,$3,$4,$5,$6,$7,$8,$9);
"#;

pub const QUERY_GET_SERVICE_BOOKING: &str = r#"
SELECT
    id,buyer_id,seller_id,vet_id,service_id,appointment_time,
    status,decline_reason,created_at,updated_at
FROM service_booking
WHERE id=$1;
"#;

pub const QUERY_SET_SERVICE_BOOKING_STATUS: &str = r#"
UPDATE service_booking SET status=$2, decline_reason=$3, updated_at=$4 WHERE id=$1;
"#;

pub const QUERY_DELETE_SERVICE_BOOKING: &str = r#"
DELETE FROM service_booking WHERE id=$1 AND status='declined';
"#;

pub const QUERY_GET_VET_APPOINTMENTS: &str = r#"
SELECT
    sb.id,sb.buyer_id,sb.seller_id,sb.vet_id,sb.service_id,sb.appointment_time,
    sb.status,sb.decline_reason,sb.created_at,sb.updated_at,
    COALESCE(b.name, s.name) AS booker_name,
    COALESCE(b.email, s.email) AS booker_email,
    vs.service_name,vs.price AS service_price,
    v.name AS vet_name,v.clinic_name
FROM service_booking AS sb
LEFT JOIN buyer AS b ON (b.id = sb.buyer_id)
LEFT JOIN seller AS s ON (s.id = sb.seller_id)
INNER JOIN vet_service AS vs ON (vs.id = sb.service_id)
INNER JOIN vet AS v ON (v.id = sb.vet_id)
WHERE sb.vet_id = $1
ORDER BY sb.appointment_time ASC;
"#;

pub const QUERY_GET_BUYER_APPOINTMENTS: &str = r#"
SELECT
    sb.id,sb.buyer_id,sb.seller_id,sb.vet_id,sb.service_id,sb.appointment_time,
    sb.status,sb.decline_reason,sb.created_at,sb.updated_at,
    COALESCE(b.name, s.name) AS booker_name,
    COALESCE(b.email, s.email) AS booker_email,
    vs.service_name,vs.price AS service_price,
    v.name AS vet_name,v.clinic_name
FROM service_booking AS sb
LEFT JOIN buyer AS b ON (b.id = sb.buyer_id)
LEFT JOIN seller AS s ON (s.id = sb.seller_id)
INNER JOIN vet_service AS vs ON (vs.id = sb.service_id)
INNER JOIN vet AS v ON (v.id = sb.vet_id)
WHERE sb.buyer_id = $1
ORDER BY sb.appointment_time ASC;
"#;

pub const QUERY_GET_SELLER_APPOINTMENTS: &str = r#"
SELECT
    sb.id,sb.buyer_id,sb.seller_id,sb.vet_id,sb.service_id,sb.appointment_time,
    sb.status,sb.decline_reason,sb.created_at,sb.updated_at,
    COALESCE(b.name, s.name) AS booker_name,
    COALESCE(b.email, s.email) AS booker_email,
    vs.service_name,vs.price AS service_price,
    v.name AS vet_name,v.clinic_name
FROM service_booking AS sb
LEFT JOIN buyer AS b ON (b.id = sb.buyer_id)
LEFT JOIN seller AS s ON (s.id = sb.seller_id)
INNER JOIN vet_service AS vs ON (vs.id = sb.service_id)
INNER JOIN vet AS v ON (v.id = sb.vet_id)
WHERE sb.seller_id = $1
ORDER BY sb.appointment_time ASC;
"#;
